use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;

use super::aggregate::AllowList;
use crate::shared::RsvpError;

/// Состояние шлюза доступа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// Начальное состояние и состояние после очистки поля
    #[default]
    Unknown,
    Granted,
    Denied,
    /// Список недоступен: закрыто, но отличимо от `Denied`
    Error,
}

impl GateState {
    pub fn is_open(&self) -> bool {
        matches!(self, GateState::Granted)
    }

    /// Радиокнопки участия активны только при открытом шлюзе
    pub fn radios_enabled(&self) -> bool {
        self.is_open()
    }
}

/// Результат проверки вместе с введённым именем для обратной связи
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateVerdict {
    pub state: GateState,
    pub display_name: String,
}

/// Источник сырого содержимого списка гостей
#[async_trait(?Send)]
pub trait NameSource {
    async fn fetch_names(&self) -> Result<String, RsvpError>;
}

/// Кэш списка на время жизни страницы: пусто → заполнен один раз.
///
/// Сохраняется только успешно разобранный список, поэтому после ошибки
/// следующая проверка пробует загрузить его снова.
#[derive(Debug, Default)]
pub struct NameListCache {
    slot: RefCell<Option<Rc<AllowList>>>,
}

impl NameListCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Rc<AllowList>> {
        self.slot.borrow().clone()
    }

    /// Сохранить список, если кэш ещё пуст; иначе вернуть уже сохранённый
    pub fn store(&self, list: AllowList) -> Rc<AllowList> {
        let mut slot = self.slot.borrow_mut();
        slot.get_or_insert_with(|| Rc::new(list)).clone()
    }

    pub fn is_populated(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

// ============================================================================
// Access gate
// ============================================================================

pub struct AccessGate<S: NameSource> {
    source: S,
    cache: NameListCache,
}

impl<S: NameSource> AccessGate<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: NameListCache::new(),
        }
    }

    pub fn cache(&self) -> &NameListCache {
        &self.cache
    }

    /// Загрузить список при первом обращении
    pub async fn allow_list(&self) -> Result<Rc<AllowList>, RsvpError> {
        if let Some(list) = self.cache.get() {
            return Ok(list);
        }
        let body = self.source.fetch_names().await?;
        let list = AllowList::from_json(&body)?;
        log::debug!("name list loaded: {} entries", list.len());
        Ok(self.cache.store(list))
    }

    /// `AccessDenied` для имени вне списка; ошибки загрузки пробрасываются
    async fn admit(&self, name: &str) -> Result<(), RsvpError> {
        let list = self.allow_list().await?;
        if list.contains(name) {
            Ok(())
        } else {
            Err(RsvpError::AccessDenied)
        }
    }

    pub async fn check_access(&self, raw_name: &str) -> GateState {
        self.verdict(raw_name).await.state
    }

    /// Проверить имя. Пустой ввод даёт `Unknown` без обращения к источнику.
    pub async fn verdict(&self, raw_name: &str) -> GateVerdict {
        let display_name = raw_name.trim().to_string();
        if super::normalize_name(&display_name).is_empty() {
            return GateVerdict {
                state: GateState::Unknown,
                display_name,
            };
        }

        let state = match self.admit(&display_name).await {
            Ok(()) => GateState::Granted,
            Err(RsvpError::AccessDenied) => GateState::Denied,
            Err(e) => {
                log::warn!("Access check failed: {}", e);
                GateState::Error
            }
        };

        GateVerdict {
            state,
            display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeSource {
        body: Result<String, RsvpError>,
        calls: Cell<usize>,
    }

    impl FakeSource {
        fn ok(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                body: Err(RsvpError::NameListFetch("HTTP 500".to_string())),
                calls: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl NameSource for FakeSource {
        async fn fetch_names(&self) -> Result<String, RsvpError> {
            self.calls.set(self.calls.get() + 1);
            self.body.clone()
        }
    }

    #[tokio::test]
    async fn test_granted_denied_unknown() {
        let gate = AccessGate::new(FakeSource::ok(r#"["Jo Smith"]"#));

        assert_eq!(gate.check_access("jo smith").await, GateState::Granted);
        assert_eq!(gate.check_access("Jo Smythe").await, GateState::Denied);
        assert_eq!(gate.check_access("").await, GateState::Unknown);
        assert_eq!(gate.check_access(" - ").await, GateState::Unknown);
    }

    #[tokio::test]
    async fn test_admit_reports_denial_as_error() {
        let gate = AccessGate::new(FakeSource::ok(r#"["ALEXTURNER"]"#));
        assert_eq!(gate.admit("Alex Turner").await, Ok(()));
        assert_eq!(gate.admit("Sam Jones").await, Err(RsvpError::AccessDenied));
    }

    #[tokio::test]
    async fn test_empty_input_does_not_fetch() {
        let gate = AccessGate::new(FakeSource::ok(r#"["Jo Smith"]"#));
        gate.check_access("").await;
        assert_eq!(gate.source.calls.get(), 0);
        assert!(!gate.cache().is_populated());
    }

    #[tokio::test]
    async fn test_list_fetched_once() {
        let gate = AccessGate::new(FakeSource::ok(r#"{"allowed": ["ALEXTURNER"]}"#));

        assert_eq!(gate.check_access("Alex Turner").await, GateState::Granted);
        assert_eq!(gate.check_access("Alex").await, GateState::Denied);
        assert_eq!(gate.check_access("alex-turner").await, GateState::Granted);
        assert_eq!(gate.source.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_error_not_denied() {
        let gate = AccessGate::new(FakeSource::failing());
        let state = gate.check_access("Jo Smith").await;

        assert_eq!(state, GateState::Error);
        assert!(!state.radios_enabled());
        assert!(!gate.cache().is_populated());

        // failures are not cached
        gate.check_access("Jo Smith").await;
        assert_eq!(gate.source.calls.get(), 2);
    }

    #[tokio::test]
    async fn test_parse_failure_is_error() {
        let gate = AccessGate::new(FakeSource::ok("not json"));
        assert_eq!(gate.check_access("Jo Smith").await, GateState::Error);
    }

    #[tokio::test]
    async fn test_verdict_echoes_trimmed_display_name() {
        let gate = AccessGate::new(FakeSource::ok(r#"["Jo Smith"]"#));
        let verdict = gate.verdict("  Jo Smith ").await;
        assert_eq!(verdict.display_name, "Jo Smith");
        assert_eq!(verdict.state, GateState::Granted);
    }

    #[test]
    fn test_cache_keeps_first_list() {
        let cache = NameListCache::new();
        cache.store(AllowList::new(["A"]));
        let kept = cache.store(AllowList::new(["B", "C"]));
        assert_eq!(kept.len(), 1);
    }
}
