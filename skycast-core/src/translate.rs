/// English condition phrases and their Russian equivalents.
const TRANSLATIONS: &[(&str, &str)] = &[
    ("clear sky", "ясно"),
    ("few clouds", "небольшая облачность"),
    ("scattered clouds", "рассеянные облака"),
    ("broken clouds", "облачно с прояснениями"),
    ("shower rain", "ливень"),
    ("rain", "дождь"),
    ("thunderstorm", "гроза"),
    ("snow", "снег"),
    ("mist", "туман"),
];

/// Localize a condition phrase; unknown phrases come back unchanged.
pub fn translate_description(description: &str) -> &str {
    TRANSLATIONS
        .iter()
        .find(|(en, _)| *en == description)
        .map(|(_, ru)| *ru)
        .unwrap_or(description)
}
