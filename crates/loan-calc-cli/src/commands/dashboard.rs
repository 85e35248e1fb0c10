use clap::Args;
use colored::{ColoredString, Colorize};
use std::fs;
use std::io::{self, BufRead, Write};
use tabled::{builder::Builder, Table};

use loan_calc_core::dashboard::page::{Page, ABOUT};
use loan_calc_core::dashboard::theme::{Theme, ThemeMode};
use loan_calc_core::dashboard::Dashboard;
use loan_calc_core::Currency;

/// Arguments for the interactive dashboard
#[derive(Args)]
pub struct DashboardArgs {
    /// Read commands from a file instead of stdin
    #[arg(long)]
    pub script: Option<String>,

    /// Start in dark mode
    #[arg(long)]
    pub dark: bool,
}

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetAmount(String),
    SetRate(String),
    SetYears(String),
    SetCurrency(Currency),
    Calculate,
    Reset,
    Navigate(Page),
    ToggleTheme,
    Show,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  amount <value>      set the loan amount
  rate <percent>      set the annual interest rate
  years <value>       set the term in years
  currency <code>     label amounts as USD, EUR or INR
  calculate           compute EMI and schedule
  reset               clear the schedule (inputs are kept)
  page <name>         go to home, exchange, about or error
  home                back to the loan form
  theme               toggle light/dark mode
  show                redraw the current page
  help                this text
  quit                leave the dashboard";

pub fn parse_action(line: &str) -> Result<Action, String> {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    let require = |what: &str| -> Result<String, String> {
        if arg.is_empty() {
            Err(format!("'{cmd}' needs {what}"))
        } else {
            Ok(arg.to_string())
        }
    };

    match cmd.to_ascii_lowercase().as_str() {
        "amount" => Ok(Action::SetAmount(require("a value")?)),
        "rate" => Ok(Action::SetRate(require("a percentage")?)),
        "years" | "term" => Ok(Action::SetYears(require("a number of years")?)),
        "currency" => require("a currency code")?
            .parse::<Currency>()
            .map(Action::SetCurrency)
            .map_err(|e| e.to_string()),
        "calculate" | "calc" => Ok(Action::Calculate),
        "reset" => Ok(Action::Reset),
        "page" | "go" => require("a page name")?
            .parse::<Page>()
            .map(Action::Navigate)
            .map_err(|e| e.to_string()),
        "home" | "title" => Ok(Action::Navigate(Page::Loan)),
        "theme" => Ok(Action::ToggleTheme),
        "show" | "" => Ok(Action::Show),
        "help" | "?" => Ok(Action::Help),
        "quit" | "exit" | "q" => Ok(Action::Quit),
        other => Err(format!("unknown command '{other}', try 'help'")),
    }
}

/// Apply an action; returns false once the session should end.
pub fn apply<W: Write>(dash: &mut Dashboard, action: Action, out: &mut W) -> io::Result<bool> {
    match action {
        Action::SetAmount(text) => dash.calculator_mut().set_amount(text),
        Action::SetRate(text) => dash.calculator_mut().set_rate(text),
        Action::SetYears(text) => dash.calculator_mut().set_years(text),
        Action::SetCurrency(currency) => {
            dash.calculator_mut().set_currency(currency);
            render(dash, out)?;
        }
        Action::Calculate => {
            dash.calculator_mut().calculate();
            render(dash, out)?;
        }
        Action::Reset => {
            dash.calculator_mut().reset();
            render(dash, out)?;
        }
        Action::Navigate(page) => {
            dash.navigate(page);
            render(dash, out)?;
        }
        Action::ToggleTheme => {
            dash.toggle_theme();
            render(dash, out)?;
        }
        Action::Show => render(dash, out)?,
        Action::Help => writeln!(out, "{HELP}")?,
        Action::Quit => return Ok(false),
    }
    Ok(true)
}

fn heading(theme: &Theme, text: &str) -> ColoredString {
    let (r, g, b) = theme.primary_rgb();
    text.truecolor(r, g, b).bold()
}

fn body(theme: &Theme, text: &str) -> ColoredString {
    let (r, g, b) = theme.text_rgb();
    match theme.mode {
        ThemeMode::Light => text.normal(),
        ThemeMode::Dark => text.truecolor(r, g, b),
    }
}

fn render_nav<W: Write>(dash: &Dashboard, theme: &Theme, out: &mut W) -> io::Result<()> {
    let buttons: Vec<String> = Page::ALL
        .iter()
        .map(|p| {
            if *p == dash.page() {
                format!("[{}]", p.nav_label())
            } else {
                p.nav_label().to_string()
            }
        })
        .collect();
    let switch = if theme.mode.is_dark() { "dark" } else { "light" };
    writeln!(
        out,
        "{}  {}  ({} mode)",
        heading(theme, "Loan Calculator"),
        buttons.join(" | "),
        switch
    )
}

fn render_loan<W: Write>(dash: &Dashboard, theme: &Theme, out: &mut W) -> io::Result<()> {
    let calc = dash.calculator();
    writeln!(out, "{}", heading(theme, "Loan Calculator Dashboard"))?;
    writeln!(
        out,
        "{}",
        body(
            theme,
            &format!(
                "Loan Amount: {}   Interest Rate (%): {}   Term (Years): {}",
                calc.amount(),
                calc.rate(),
                calc.years()
            )
        )
    )?;

    let Some(emi) = calc.emi_display() else {
        return Ok(());
    };

    writeln!(out)?;
    writeln!(out, "{}", heading(theme, &format!("Monthly EMI: {emi}")))?;
    writeln!(out, "{}", body(theme, &format!("Currency: {}", calc.currency())))?;

    let mut builder = Builder::default();
    builder.push_record(["Month", "Principal", "Interest", "Remaining Balance"]);
    for row in calc.formatted_rows() {
        builder.push_record([row.month.to_string(), row.principal, row.interest, row.balance]);
    }
    writeln!(out, "{}", Table::from(builder))
}

fn render_about<W: Write>(theme: &Theme, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", heading(theme, ABOUT.title))?;
    writeln!(out, "{}", body(theme, ABOUT.description))?;
    writeln!(out)?;
    writeln!(out, "{}", heading(theme, "Features"))?;
    for feature in ABOUT.features {
        writeln!(out, "{}", body(theme, &format!("  - {feature}")))?;
    }
    Ok(())
}

/// Draw the navigation bar and the current page.
pub fn render<W: Write>(dash: &Dashboard, out: &mut W) -> io::Result<()> {
    let theme = dash.theme();
    render_nav(dash, &theme, out)?;
    writeln!(out)?;
    match dash.page() {
        Page::Loan => render_loan(dash, &theme, out)?,
        Page::About => render_about(&theme, out)?,
        page => {
            let text = page.placeholder().unwrap_or_default();
            writeln!(out, "{}", body(&theme, text))?;
        }
    }
    writeln!(out)
}

/// Print the About page on its own.
pub fn print_about() -> io::Result<()> {
    let stdout = io::stdout();
    render_about(&Theme::new(ThemeMode::Light), &mut stdout.lock())
}

fn run_session<R: BufRead, W: Write>(
    dash: &mut Dashboard,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    render(dash, out)?;
    for line in input.lines() {
        let line = line?;
        match parse_action(&line) {
            Ok(action) => {
                log::debug!("dashboard action: {:?}", action);
                if !apply(dash, action, out)? {
                    break;
                }
            }
            Err(msg) => writeln!(out, "{}: {}", "error".red().bold(), msg)?,
        }
        out.flush()?;
    }
    Ok(())
}

pub fn run_dashboard(args: DashboardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut dash = Dashboard::new();
    if args.dark {
        dash.toggle_theme();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(ref path) = args.script {
        let script = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
        run_session(&mut dash, script.as_bytes(), &mut out)
    } else {
        if atty::is(atty::Stream::Stdin) {
            writeln!(out, "Type 'help' for commands.")?;
        }
        run_session(&mut dash, io::stdin().lock(), &mut out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &str) -> (Dashboard, String) {
        colored::control::set_override(false);
        let mut dash = Dashboard::new();
        let mut out = Vec::new();
        run_session(&mut dash, script.as_bytes(), &mut out).unwrap();
        (dash, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(parse_action("amount 5000").unwrap(), Action::SetAmount("5000".into()));
        assert_eq!(parse_action("  RATE 7.5 ").unwrap(), Action::SetRate("7.5".into()));
        assert_eq!(parse_action("currency inr").unwrap(), Action::SetCurrency(Currency::INR));
        assert_eq!(parse_action("page about").unwrap(), Action::Navigate(Page::About));
        assert_eq!(parse_action("home").unwrap(), Action::Navigate(Page::Loan));
        assert_eq!(parse_action("").unwrap(), Action::Show);
        assert!(parse_action("amount").is_err());
        assert!(parse_action("currency GBP").is_err());
        assert!(parse_action("frobnicate").is_err());
    }

    #[test]
    fn test_calculate_renders_emi_and_table() {
        let (dash, text) = session("calculate\nquit\n");
        assert!(dash.calculator().has_result());
        assert!(text.contains("Monthly EMI: USD 2051.65"));
        assert!(text.contains("Remaining Balance"));
        assert!(text.contains("708.33 USD"));
    }

    #[test]
    fn test_reset_hides_result_keeps_fields() {
        let (dash, text) = session("amount 20000\ncalculate\nreset\nquit\n");
        assert!(!dash.calculator().has_result());
        assert_eq!(dash.calculator().amount(), "20000");
        assert!(text.contains("Loan Amount: 20000"));
    }

    #[test]
    fn test_invalid_field_shows_no_result() {
        let (dash, text) = session("rate zero\ncalculate\n");
        assert!(!dash.calculator().has_result());
        assert!(!text.contains("Monthly EMI"));
    }

    #[test]
    fn test_unrepresentable_amount_shows_no_result() {
        let (dash, text) = session("amount 70000000000000000000000000000\ncalculate\nquit\n");
        assert!(!dash.calculator().has_result());
        assert!(!text.contains("Monthly EMI"));
    }

    #[test]
    fn test_placeholder_pages_and_theme() {
        let (dash, text) = session("page exchange\npage error\ntheme\n");
        assert!(text.contains("Exchange Rates Page (to be implemented)"));
        assert!(text.contains("Error Page (to be implemented)"));
        assert!(text.contains("(dark mode)"));
        assert_eq!(dash.page(), Page::Error);
    }

    #[test]
    fn test_quit_stops_processing() {
        let (dash, _) = session("quit\namount 1\n");
        assert_eq!(dash.calculator().amount(), "100000");
    }

    #[test]
    fn test_unknown_command_reports_error() {
        let (_, text) = session("launch\n");
        assert!(text.contains("unknown command 'launch'"));
    }
}
