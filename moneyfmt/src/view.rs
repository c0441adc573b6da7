use tracing::warn;
use crate::formatter::try_render;
use crate::model::Configuration;
use crate::normalizer::normalize;

/// Состояние хоста: текущая конфигурация и текущая отображаемая строка.
///
/// Отображаемая строка - единственный источник истины,
/// "сырое" значение каждый раз восстанавливается из неё через [`normalize`].
///
/// Пример использования:
/// ```
/// use moneyfmt::{Configuration, MoneyView};
///
/// let mut view = MoneyView::new(Configuration::default());
/// view.set_raw_amount("USD", "1340");
/// view.set_show_currency(true);
///
/// assert_eq!(view.display_value(), "1,340.00 USD");
/// assert_eq!(view.raw_value(), "1340.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyView {
    config: Configuration,
    display: String,
}

impl MoneyView {
    /// Пустое представление
    pub fn new(config: Configuration) -> Self {
        MoneyView { config, display: String::new() }
    }

    /// Представление с уже имеющимся текстом, который сразу переформатируется
    pub fn with_text(config: Configuration, text: impl Into<String>) -> Self {
        let mut view = MoneyView { config, display: text.into() };
        let at_end = view.config.currency_at_end;
        view.refresh(at_end);
        view
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Текущая строка как есть, без пересчёта
    pub fn display_value(&self) -> &str {
        &self.display
    }

    /// Число без разделителей и кода валюты
    pub fn raw_value(&self) -> String {
        normalize(&self.display, self.config.currency_at_end)
    }

    /// Заменяет конфигурацию целиком и перерисовывает
    pub fn set_configuration(&mut self, config: Configuration) {
        let old_at_end = self.config.currency_at_end;
        self.config = config;
        self.refresh(old_at_end);
    }

    pub fn set_currency(&mut self, currency_code: impl Into<String>) {
        self.update(|c| c.with_currency(currency_code));
    }

    pub fn set_show_currency(&mut self, show_currency: bool) {
        self.update(|c| c.with_show_currency(show_currency));
    }

    pub fn set_currency_at_end(&mut self, currency_at_end: bool) {
        self.update(|c| c.with_currency_at_end(currency_at_end));
    }

    pub fn set_simplify_amount(&mut self, simplify_amount: bool) {
        self.update(|c| c.with_simplify_amount(simplify_amount));
    }

    pub fn set_absolute_value(&mut self, absolute_value: bool) {
        self.update(|c| c.with_absolute_value(absolute_value));
    }

    /// Устанавливает валюту и сумму одним действием
    pub fn set_raw_amount(&mut self, currency_code: impl Into<String>, amount: impl Into<String>) {
        self.display = amount.into();
        self.set_currency(currency_code);
    }

    fn update<F>(&mut self, change: F)
    where
        F: FnOnce(Configuration) -> Configuration,
    {
        let config = change(self.config.clone());
        self.set_configuration(config);
    }

    /// Восстанавливает сырое значение по старому положению валюты
    /// и форматирует его по новой конфигурации.
    ///
    /// При ошибке оставляет прежний текст.
    fn refresh(&mut self, old_at_end: bool) {
        let raw = normalize(&self.display, old_at_end);

        match try_render(&raw, &self.config) {
            Ok(rendered) => self.display = rendered,
            Err(err) => warn!("keeping {:?}: {err}", self.display),
        }
    }
}
