// components/translations/src/lib.rs
//! User-facing message catalog for English, Spanish and French.
//!
//! An explicit (language, key) lookup over static templates, no ambient
//! globals. Templates use `{name}` placeholders filled by [`render`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
}

impl Language {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            "fr" => Some(Language::Fr),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }
}

/// Message ids used by the CLI surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    PlaylistName,
    TracksFound,
    StartingDownload,
    SavingTo,
    StatusDownloading,
    StatusDone,
    StoppedByUser,
    DownloadError,
}

/// Look up the template for `key` in `lang`. The catalog is complete for
/// all three languages, so the match is exhaustive and there is no runtime
/// fallback path to go wrong.
pub fn lookup(lang: Language, key: Key) -> &'static str {
    use Key::*;
    use Language::*;

    match (lang, key) {
        (En, PlaylistName) => "Playlist: {name}",
        (En, TracksFound) => "Tracks found: {count}",
        (En, StartingDownload) => "Starting download of {count} tracks",
        (En, SavingTo) => "Saving to: {folder}",
        (En, StatusDownloading) => "Downloaded {current} of {total} tracks",
        (En, StatusDone) => "Done!",
        (En, StoppedByUser) => "Stopped by user",
        (En, DownloadError) => "Error: {error}",

        (Es, PlaylistName) => "Lista: {name}",
        (Es, TracksFound) => "Pistas encontradas: {count}",
        (Es, StartingDownload) => "Iniciando descarga de {count} pistas",
        (Es, SavingTo) => "Guardando en: {folder}",
        (Es, StatusDownloading) => "Descargadas {current} de {total} pistas",
        (Es, StatusDone) => "¡Completado!",
        (Es, StoppedByUser) => "Detenido por el usuario",
        (Es, DownloadError) => "Error: {error}",

        (Fr, PlaylistName) => "Playlist: {name}",
        (Fr, TracksFound) => "Pistes trouvées: {count}",
        (Fr, StartingDownload) => "Démarrage du téléchargement de {count} pistes",
        (Fr, SavingTo) => "Sauvegarde dans: {folder}",
        (Fr, StatusDownloading) => "Téléchargé {current} sur {total} pistes",
        (Fr, StatusDone) => "Terminé!",
        (Fr, StoppedByUser) => "Arrêté par l'utilisateur",
        (Fr, DownloadError) => "Erreur: {error}",
    }
}

/// Fill `{name}` placeholders in a template. Unknown placeholders are left
/// in place rather than failing.
pub fn render(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// Convenience wrapper bundling the selected language.
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    pub fn new(lang: Language) -> Self {
        Self { lang }
    }

    pub fn tr(&self, key: Key) -> &'static str {
        lookup(self.lang, key)
    }

    pub fn format(&self, key: Key, args: &[(&str, &str)]) -> String {
        render(self.tr(key), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_per_language() {
        assert_eq!(lookup(Language::En, Key::StatusDone), "Done!");
        assert_eq!(lookup(Language::Es, Key::StatusDone), "¡Completado!");
        assert_eq!(lookup(Language::Fr, Key::StatusDone), "Terminé!");
    }

    #[test]
    fn test_render_placeholders() {
        let translator = Translator::new(Language::En);
        let line = translator.format(
            Key::StatusDownloading,
            &[("current", "3"), ("total", "10")],
        );
        assert_eq!(line, "Downloaded 3 of 10 tracks");
    }

    #[test]
    fn test_unknown_placeholder_left_in_place() {
        assert_eq!(render("Hello {who}", &[("name", "x")]), "Hello {who}");
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::from_tag("ES"), Some(Language::Es));
        assert_eq!(Language::from_tag("de"), None);
        assert_eq!(Language::default().tag(), "en");
    }
}
