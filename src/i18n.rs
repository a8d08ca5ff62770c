// Bilingual page copy. A static table per language, no runtime loading.
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::models::MenuCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }

    /// The language the switcher links to
    pub fn other(self) -> Self {
        match self {
            Self::En => Self::De,
            Self::De => Self::En,
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Self::En => &EN,
            Self::De => &DE,
        }
    }

    /// Language from a `lang` parameter, falling back when absent or unknown
    pub fn from_param(param: Option<&str>, fallback: Language) -> Self {
        param.and_then(|p| p.parse().ok()).unwrap_or(fallback)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

pub struct Strings {
    pub language_name: &'static str,
    pub nav_home: &'static str,
    pub nav_menu: &'static str,
    pub book_table: &'static str,
    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub view_menu: &'static str,
    pub menu_title: &'static str,
    pub menu_subtitle: &'static str,
    pub menu_empty: &'static str,
    pub highlights_title: &'static str,
    pub starters: &'static str,
    pub mains: &'static str,
    pub desserts: &'static str,
    pub drinks: &'static str,
    pub vegetarian: &'static str,
    pub special: &'static str,
    pub spice: &'static str,
    pub contact_title: &'static str,
    pub contact_subtitle: &'static str,
    pub form_name: &'static str,
    pub form_email: &'static str,
    pub form_phone: &'static str,
    pub form_date: &'static str,
    pub form_time: &'static str,
    pub form_guests: &'static str,
    pub form_message: &'static str,
    pub form_submit: &'static str,
    pub form_submitting: &'static str,
    pub placeholder_name: &'static str,
    pub placeholder_email: &'static str,
    pub placeholder_phone: &'static str,
    pub placeholder_message: &'static str,
    pub select_time: &'static str,
    pub person: &'static str,
    pub people: &'static str,
    pub nine_plus: &'static str,
    pub info_address: &'static str,
    pub info_phone: &'static str,
    pub info_email: &'static str,
    pub info_hours: &'static str,
    pub get_in_touch: &'static str,
    pub find_us: &'static str,
    pub submit_success: &'static str,
    pub submit_failed: &'static str,
    pub submit_unexpected: &'static str,
    pub submit_invalid: &'static str,
}

impl Strings {
    pub fn category(&self, category: MenuCategory) -> &'static str {
        match category {
            MenuCategory::Starters => self.starters,
            MenuCategory::Mains => self.mains,
            MenuCategory::Desserts => self.desserts,
            MenuCategory::Drinks => self.drinks,
        }
    }
}

static EN: Strings = Strings {
    language_name: "English",
    nav_home: "Home",
    nav_menu: "Menu",
    book_table: "Book a Table",
    hero_title: "South Indian Cuisine in Singen",
    hero_subtitle: "Fresh dosas, fragrant curries and warm hospitality served on a bay leaf.",
    view_menu: "View Menu",
    menu_title: "Our Menu",
    menu_subtitle: "Dishes cooked fresh every day.",
    menu_empty: "The menu is being updated. Please check back soon.",
    highlights_title: "Chef's Specials",
    starters: "Starters",
    mains: "Main Courses",
    desserts: "Desserts",
    drinks: "Drinks",
    vegetarian: "Vegetarian",
    special: "Special",
    spice: "Spice",
    contact_title: "Contact & Reservations",
    contact_subtitle: "Reserve your table or get in touch with us.",
    form_name: "Name",
    form_email: "Email",
    form_phone: "Phone",
    form_date: "Date",
    form_time: "Time",
    form_guests: "Guests",
    form_message: "Special Requests",
    form_submit: "Reserve Now",
    form_submitting: "Submitting...",
    placeholder_name: "Your name",
    placeholder_email: "Your email",
    placeholder_phone: "Your phone number",
    placeholder_message: "Any special requests or dietary requirements?",
    select_time: "Select time",
    person: "person",
    people: "people",
    nine_plus: "9+ people",
    info_address: "Address",
    info_phone: "Phone",
    info_email: "Email",
    info_hours: "Opening Hours",
    get_in_touch: "Get in Touch",
    find_us: "Find Us",
    submit_success: "Reservation submitted successfully! We will contact you soon to confirm.",
    submit_failed: "Failed to submit reservation. Please try again.",
    submit_unexpected: "An unexpected error occurred. Please try again.",
    submit_invalid: "Please fill in all required fields correctly.",
};

static DE: Strings = Strings {
    language_name: "Deutsch",
    nav_home: "Start",
    nav_menu: "Speisekarte",
    book_table: "Tisch reservieren",
    hero_title: "Südindische Küche in Singen",
    hero_subtitle: "Frische Dosas, duftende Currys und herzliche Gastfreundschaft auf dem Lorbeerblatt.",
    view_menu: "Speisekarte ansehen",
    menu_title: "Unsere Speisekarte",
    menu_subtitle: "Jeden Tag frisch gekocht.",
    menu_empty: "Die Speisekarte wird gerade aktualisiert. Bitte schauen Sie bald wieder vorbei.",
    highlights_title: "Empfehlungen des Küchenchefs",
    starters: "Vorspeisen",
    mains: "Hauptgerichte",
    desserts: "Desserts",
    drinks: "Getränke",
    vegetarian: "Vegetarisch",
    special: "Spezialität",
    spice: "Schärfe",
    contact_title: "Kontakt & Reservierung",
    contact_subtitle: "Reservieren Sie Ihren Tisch oder kontaktieren Sie uns.",
    form_name: "Name",
    form_email: "E-Mail",
    form_phone: "Telefon",
    form_date: "Datum",
    form_time: "Uhrzeit",
    form_guests: "Gäste",
    form_message: "Besondere Wünsche",
    form_submit: "Jetzt reservieren",
    form_submitting: "Wird übermittelt...",
    placeholder_name: "Ihr Name",
    placeholder_email: "Ihre E-Mail",
    placeholder_phone: "Ihre Telefonnummer",
    placeholder_message: "Besondere Wünsche oder Ernährungsanforderungen?",
    select_time: "Zeit auswählen",
    person: "Person",
    people: "Personen",
    nine_plus: "9+ Personen",
    info_address: "Adresse",
    info_phone: "Telefon",
    info_email: "E-Mail",
    info_hours: "Öffnungszeiten",
    get_in_touch: "Kontaktieren Sie uns",
    find_us: "Finden Sie uns",
    submit_success:
        "Reservierung erfolgreich übermittelt! Wir werden Sie bald kontaktieren, um zu bestätigen.",
    submit_failed:
        "Reservierung konnte nicht übermittelt werden. Bitte versuchen Sie es erneut.",
    submit_unexpected:
        "Ein unerwarteter Fehler ist aufgetreten. Bitte versuchen Sie es erneut.",
    submit_invalid: "Bitte füllen Sie alle Pflichtfelder korrekt aus.",
};
