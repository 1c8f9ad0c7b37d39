//! Key → localized-string lookup.
//!
//! The service's real dictionary lives server-side; the dashboard only
//! needs a small fixed set of interface strings. Unknown keys echo the
//! key itself so a missing entry is visible instead of a blank label.

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn from_tag(tag: &str) -> Self {
        if tag.to_ascii_lowercase().starts_with("en") {
            Self::En
        } else {
            Self::Fr
        }
    }
}

/// Translates interface keys for one fixed language.
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    pub fn new(lang: Language) -> Self {
        Self { lang }
    }

    /// Look up a key. Unknown keys are echoed back verbatim.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let table = match self.lang {
            Language::Fr => lookup_fr(key),
            Language::En => lookup_en(key),
        };
        table.unwrap_or(key)
    }
}

fn lookup_fr(key: &str) -> Option<&'static str> {
    Some(match key {
        "nav.home" => "Accueil",
        "nav.pricing" => "Tarifs",
        "nav.reviews" => "Avis",
        "nav.login" => "Connexion",
        "nav.admin" => "Administration",
        "pricing.title" => "Nos formules",
        "pricing.loading" => "Chargement des tarifs…",
        "pricing.empty" => "Aucune formule disponible pour le moment",
        "pricing.next_update" => "Prochaine mise à jour",
        "pricing.unlock_fee" => "Frais de déblocage",
        "pricing.per_hour" => "/heure",
        "pricing.day" => "Jour",
        "pricing.week" => "Semaine",
        "pricing.month" => "Mois",
        "pricing.popular" => "Populaire",
        "pricing.promoted" => "Promo",
        "pricing.cta" => "Choisir cette formule",
        "pricing.cta_promoted" => "Profiter de l'offre",
        "reviews.title" => "Avis clients",
        "reviews.empty" => "Pas encore d'avis",
        "reviews.submit" => "Envoyer",
        "reviews.sent" => "Merci pour votre avis !",
        "login.title" => "Espace administrateur",
        "login.username" => "Identifiant",
        "login.password" => "Mot de passe",
        "login.submit" => "Se connecter",
        "home.contact" => "Contact",
        _ => return None,
    })
}

fn lookup_en(key: &str) -> Option<&'static str> {
    Some(match key {
        "nav.home" => "Home",
        "nav.pricing" => "Pricing",
        "nav.reviews" => "Reviews",
        "nav.login" => "Sign in",
        "nav.admin" => "Admin",
        "pricing.title" => "Our plans",
        "pricing.loading" => "Loading rates…",
        "pricing.empty" => "No plans available right now",
        "pricing.next_update" => "Next update",
        "pricing.unlock_fee" => "Unlock fee",
        "pricing.per_hour" => "/hour",
        "pricing.day" => "Day",
        "pricing.week" => "Week",
        "pricing.month" => "Month",
        "pricing.popular" => "Popular",
        "pricing.promoted" => "Deal",
        "pricing.cta" => "Choose this plan",
        "pricing.cta_promoted" => "Grab the deal",
        "reviews.title" => "Customer reviews",
        "reviews.empty" => "No reviews yet",
        "reviews.submit" => "Send",
        "reviews.sent" => "Thanks for your review!",
        "login.title" => "Admin area",
        "login.username" => "Username",
        "login.password" => "Password",
        "login.submit" => "Sign in",
        "home.contact" => "Contact",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_translate_per_language() {
        let fr = Translator::new(Language::Fr);
        let en = Translator::new(Language::En);
        assert_eq!(fr.t("nav.pricing"), "Tarifs");
        assert_eq!(en.t("nav.pricing"), "Pricing");
    }

    #[test]
    fn unknown_keys_echo_back() {
        let fr = Translator::new(Language::Fr);
        assert_eq!(fr.t("nav.does_not_exist"), "nav.does_not_exist");
    }

    #[test]
    fn language_tag_detection() {
        assert_eq!(Language::from_tag("en-US"), Language::En);
        assert_eq!(Language::from_tag("fr"), Language::Fr);
        assert_eq!(Language::from_tag("wo"), Language::Fr);
    }
}
