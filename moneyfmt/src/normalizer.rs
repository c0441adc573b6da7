use crate::utils::strip_grouping;

/// Восстанавливает "сырое" значение из отображаемой строки.
///
/// Убирает запятые и отрезает код валюты по первому пробелу:
/// - валюта в конце - число до пробела
/// - валюта в начале - число после пробела
///
/// Ошибок не возвращает: некорректный ввод отдаётся как есть и упадёт уже при разборе.
///
/// ```
/// use moneyfmt::normalize;
///
/// assert_eq!(normalize("USD 1,340.00", false), "1340.00");
/// assert_eq!(normalize("134,000 VND", true), "134000");
/// ```
pub fn normalize(display: &str, currency_at_end: bool) -> String {
    let stripped = strip_grouping(display);

    match stripped.split_once(' ') {
        Some((number, _)) if currency_at_end => number.to_string(),
        Some((_, number)) => number.to_string(),
        None => stripped,
    }
}
