use std::sync::{Mutex, MutexGuard};

use tracing::warn;

/// Trava `lock`, recuperando o guard se um dono anterior entrou em pânico.
///
/// O estado do cache só muda por chamadas de `LruCache` e `HashMap` que não
/// deixam a estrutura pela metade, então um guard envenenado continua
/// consistente.
pub(crate) fn mutex_lock<'a, T>(
    lock: &'a Mutex<T>,
    target: &'static str,
    op: &'static str,
) -> MutexGuard<'a, T> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!(
                op,
                target_module = target,
                lock_kind = "mutex.lock",
                result = "poisoned_recovered",
                "Recovered from poisoned cache lock"
            );
            poisoned.into_inner()
        }
    }
}
