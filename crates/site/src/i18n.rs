//! Static UI translations.
//!
//! The site ships English and Spanish strings for navigation and form
//! chrome. Project content is translated per-row in the database instead;
//! this table only covers fixed UI text. Unknown keys render as themselves
//! so a missing entry is visible in the page rather than a panic.

use tower_sessions::Session;

use portfolio_core::Locale;

use crate::models::session::keys;

/// Look up a UI string for a locale.
///
/// Returns the key itself when no translation exists.
#[must_use]
pub fn translate<'a>(locale: Locale, key: &'a str) -> &'a str {
    let table = match locale {
        Locale::En => EN,
        Locale::Es => ES,
    };
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(key, |(_, v)| v)
}

/// Resolve the visitor's locale from their session.
///
/// Falls back to English when the session has no (or an unreadable) value.
pub async fn resolve_locale(session: &Session) -> Locale {
    session
        .get::<Locale>(keys::LANG)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Store the visitor's locale in their session.
pub async fn store_locale(session: &Session, locale: Locale) {
    if let Err(e) = session.insert(keys::LANG, locale).await {
        tracing::debug!(error = %e, "Failed to store locale in session");
    }
}

const EN: &[(&str, &str)] = &[
    ("brand_left", "CARLOS"),
    ("brand_right", "_SIBRIAN"),
    ("nav_home", "Home"),
    ("nav_about", "About"),
    ("nav_projects", "Projects"),
    ("nav_contact", "Contact"),
    ("hero_tagline", "Software developer building useful things for the web."),
    ("hero_cta", "See my work"),
    ("featured_heading", "Featured projects"),
    ("projects_heading", "Projects"),
    ("projects_filter_all", "All"),
    ("project_repo", "Source code"),
    ("project_live", "Live site"),
    ("project_video", "Demo video"),
    ("about_heading", "About me"),
    ("contact_heading", "Get in touch"),
    ("contact_name", "Name"),
    ("contact_email", "Email"),
    ("contact_message", "Message"),
    ("contact_send", "Send message"),
    ("contact_thanks", "Thanks for your message! I'll get back to you soon."),
    ("footer_rights", "All rights reserved."),
];

const ES: &[(&str, &str)] = &[
    ("brand_left", "CARLOS"),
    ("brand_right", "_SIBRIAN"),
    ("nav_home", "Inicio"),
    ("nav_about", "Sobre mí"),
    ("nav_projects", "Proyectos"),
    ("nav_contact", "Contacto"),
    ("hero_tagline", "Desarrollador de software creando cosas útiles para la web."),
    ("hero_cta", "Ver mi trabajo"),
    ("featured_heading", "Proyectos destacados"),
    ("projects_heading", "Proyectos"),
    ("projects_filter_all", "Todos"),
    ("project_repo", "Código fuente"),
    ("project_live", "Sitio en vivo"),
    ("project_video", "Video demo"),
    ("about_heading", "Sobre mí"),
    ("contact_heading", "Contáctame"),
    ("contact_name", "Nombre"),
    ("contact_email", "Correo electrónico"),
    ("contact_message", "Mensaje"),
    ("contact_send", "Enviar mensaje"),
    ("contact_thanks", "¡Gracias por tu mensaje! Te responderé pronto."),
    ("footer_rights", "Todos los derechos reservados."),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_key() {
        assert_eq!(translate(Locale::En, "nav_home"), "Home");
        assert_eq!(translate(Locale::Es, "nav_home"), "Inicio");
    }

    #[test]
    fn test_translate_unknown_key_falls_back_to_key() {
        assert_eq!(translate(Locale::En, "no_such_key"), "no_such_key");
        assert_eq!(translate(Locale::Es, "no_such_key"), "no_such_key");
    }

    #[test]
    fn test_tables_cover_same_keys() {
        for (key, _) in EN {
            assert!(
                ES.iter().any(|(k, _)| k == key),
                "missing Spanish translation for {key}"
            );
        }
        for (key, _) in ES {
            assert!(
                EN.iter().any(|(k, _)| k == key),
                "missing English translation for {key}"
            );
        }
    }
}
