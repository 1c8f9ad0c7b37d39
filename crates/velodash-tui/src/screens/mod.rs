//! Screen components, one per navigation entry.

mod admin;
mod home;
mod login;
mod pricing;
mod reviews;

use velodash_core::i18n::Translator;

use crate::component::Component;
use crate::screen::ScreenId;

/// Construct every screen component, keyed by its [`ScreenId`].
pub fn create_screens(translator: Translator) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Home,
            Box::new(home::HomeScreen::new(translator)) as Box<dyn Component>,
        ),
        (
            ScreenId::Pricing,
            Box::new(pricing::PricingScreen::new(translator)),
        ),
        (
            ScreenId::Reviews,
            Box::new(reviews::ReviewsScreen::new(translator)),
        ),
        (ScreenId::Login, Box::new(login::LoginScreen::new(translator))),
        (ScreenId::Admin, Box::new(admin::AdminScreen::new())),
    ]
}
