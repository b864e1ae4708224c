//! Interface de linha de comando do feedrank.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// feedrank - servidor de feed com ranking ponderado.
#[derive(Parser, Debug)]
#[command(name = "feedrank")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "feedrank.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicia o servidor HTTP.
    Serve {
        /// Interface para o bind (sobrescreve o arquivo de configuração).
        #[arg(long)]
        host: Option<String>,

        /// Porta para o bind (sobrescreve o arquivo de configuração).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ranqueia o catálogo para um usuário e imprime o feed em JSON.
    Rank {
        /// Id do usuário.
        #[arg(short, long, default_value = crate::types::requests::GUEST_USER_ID)]
        user_id: String,
    },

    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Mostra a configuração efetiva.
    Config,

    /// Mostra versão.
    Version,
}
