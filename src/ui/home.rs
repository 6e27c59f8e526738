//! Mobile Home screen: pick a UF, then a city, then enter the points list.

use super::selection;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationPicker {
    uf: Option<String>,
    city: Option<String>,
}

impl LocationPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a UF by its select value. Any UF change clears the city, whose
    /// options belong to the previous UF; `"0"` also disables the city select.
    #[must_use]
    pub fn select_uf(self, value: &str) -> Self {
        let uf = selection(value).map(|v| v.to_uppercase());
        if uf == self.uf {
            return self;
        }
        LocationPicker { uf, city: None }
    }

    /// Choose a city. Ignored while no UF is selected, since the select is disabled.
    #[must_use]
    pub fn select_city(self, value: &str) -> Self {
        if self.uf.is_none() {
            return self;
        }
        LocationPicker {
            city: selection(value),
            ..self
        }
    }

    pub fn uf(&self) -> Option<&str> {
        self.uf.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Raw select values, `"0"` for the placeholder.
    pub fn uf_value(&self) -> &str {
        self.uf().unwrap_or(super::UNSELECTED)
    }

    pub fn city_value(&self) -> &str {
        self.city().unwrap_or(super::UNSELECTED)
    }

    pub fn city_selection_enabled(&self) -> bool {
        self.uf.is_some()
    }

    /// UF whose municipalities must be fetched for the city select.
    pub fn cities_lookup(&self) -> Option<&str> {
        self.uf()
    }

    /// Whether the enter/submit action is enabled.
    pub fn is_complete(&self) -> bool {
        self.uf.is_some() && self.city.is_some()
    }

    /// `(uf, city)` handed to the points list once both are chosen.
    pub fn destination(&self) -> Option<(String, String)> {
        match (&self.uf, &self.city) {
            (Some(uf), Some(city)) => Some((uf.clone(), city.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_everything_disabled() {
        let picker = LocationPicker::new();
        assert_eq!(picker.uf_value(), "0");
        assert_eq!(picker.city_value(), "0");
        assert!(!picker.city_selection_enabled());
        assert!(!picker.is_complete());
        assert!(picker.cities_lookup().is_none());
    }

    #[test]
    fn full_selection_enables_enter() {
        let picker = LocationPicker::new().select_uf("pe").select_city("Recife");
        assert!(picker.is_complete());
        assert_eq!(picker.cities_lookup(), Some("PE"));
        assert_eq!(picker.destination(), Some(("PE".to_string(), "Recife".to_string())));
    }

    #[test]
    fn uf_placeholder_resets_city_and_disables_enter() {
        let picker = LocationPicker::new()
            .select_uf("SP")
            .select_city("Santos")
            .select_uf("0");
        assert_eq!(picker.city_value(), "0");
        assert!(!picker.city_selection_enabled());
        assert!(!picker.is_complete());
        assert!(picker.destination().is_none());
    }

    #[test]
    fn city_is_ignored_without_uf() {
        let picker = LocationPicker::new().select_city("Recife");
        assert_eq!(picker.city(), None);
    }

    #[test]
    fn reselecting_same_uf_keeps_city() {
        let picker = LocationPicker::new()
            .select_uf("SP")
            .select_city("Santos")
            .select_uf("SP");
        assert_eq!(picker.city(), Some("Santos"));
    }

    #[test]
    fn city_placeholder_disables_enter() {
        let picker = LocationPicker::new()
            .select_uf("SP")
            .select_city("Santos")
            .select_city("0");
        assert!(picker.city_selection_enabled());
        assert!(!picker.is_complete());
    }
}
