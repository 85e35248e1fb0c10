//! State behind the single-page loan dashboard: navigation, theme and the
//! loan form. Rendering is left to the front-end.

pub mod calculator;
pub mod page;
pub mod theme;

use calculator::LoanCalculator;
use page::Page;
use theme::{Theme, ThemeMode};

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    mode: ThemeMode,
    page: Page,
    calculator: LoanCalculator,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Switch page. The loan form keeps its fields and result.
    pub fn navigate(&mut self, page: Page) {
        log::debug!("navigate {} -> {}", self.page, page);
        self.page = page;
    }

    /// The title in the navigation bar always leads back to the loan form.
    pub fn go_home(&mut self) {
        self.navigate(Page::Loan);
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn theme(&self) -> Theme {
        Theme::new(self.mode)
    }

    pub fn calculator(&self) -> &LoanCalculator {
        &self.calculator
    }

    pub fn calculator_mut(&mut self) -> &mut LoanCalculator {
        &mut self.calculator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_loan_page_in_light_mode() {
        let dash = Dashboard::new();
        assert_eq!(dash.page(), Page::Loan);
        assert_eq!(dash.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_calculator_survives_navigation() {
        let mut dash = Dashboard::new();
        dash.calculator_mut().calculate();
        dash.navigate(Page::About);
        dash.navigate(Page::ExchangeRates);
        dash.go_home();
        assert_eq!(dash.page(), Page::Loan);
        assert!(dash.calculator().has_result());
    }

    #[test]
    fn test_toggle_theme() {
        let mut dash = Dashboard::new();
        assert_eq!(dash.toggle_theme(), ThemeMode::Dark);
        assert!(dash.theme().mode.is_dark());
        assert_eq!(dash.toggle_theme(), ThemeMode::Light);
    }
}
