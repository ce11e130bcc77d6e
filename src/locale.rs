//! Locale identifiers taken from package entry paths.

/// Regional variants folded into their base language while no competing
/// regional translation exists.
///
/// Android would put pt-PT in values-pt-rPT and pt-BR in values-pt, but there is
/// no pt-BR translation yet.
const LOCALE_ALIASES: &[(&str, &str)] = &[("es-ES", "es"), ("pt-PT", "pt")];

/// The leading path segment of an entry name, e.g. `es-ES` for
/// `es-ES/strings/translatable.xml`.
pub fn locale_from_entry(name: &str) -> &str {
    name.split('/').next().unwrap_or(name)
}

/// Apply the fixed locale aliases. Any other identifier is returned unchanged.
pub fn remap_locale(locale: &str) -> &str {
    LOCALE_ALIASES
        .iter()
        .find(|(from, _)| *from == locale)
        .map(|(_, to)| *to)
        .unwrap_or(locale)
}

/// Android resource directory name for a locale.
pub fn values_dir_name(locale: &str) -> String {
    format!("values-{}", locale)
}
