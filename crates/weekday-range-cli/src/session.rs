//! Interactive picking session driven by stdin commands.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{Month, NaiveDate};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use weekday_range_core::calendar::DisplayYear;
use weekday_range_core::dismiss::DismissHub;
use weekday_range_core::field::DateRangeField;
use weekday_range_core::picker::SelectionHandler;
use weekday_range_core::range::{Confirmation, PredefinedRange};

use crate::render;

const HELP: &str = "\
Commands:
  open | close          show or hide the picker
  click YYYY-MM-DD      click a day (weekends are ignored)
  hover YYYY-MM-DD      preview the range up to a day
  leave                 drop the preview
  prev | next           previous / next month
  jump N                move N months (negative goes back)
  month M               show month M (1-12 or name)
  year Y                show year Y (1900-2100)
  preset N              apply predefined range N
  ok                    confirm the selected range
  outside               click outside the picker (dismiss)
  clear                 forget the stored selection
  show                  print the picker
  help                  print this help
  quit                  leave the session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Open,
    Close,
    Click(NaiveDate),
    Hover(NaiveDate),
    Leave,
    Jump(i32),
    Month(Month),
    Year(DisplayYear),
    Preset(usize),
    Confirm,
    Outside,
    Clear,
    Show,
    Help,
    Quit,
}

fn arg<'a>(name: &str, arg: Option<&'a str>) -> Result<&'a str> {
    arg.ok_or_else(|| anyhow!("'{name}' needs an argument"))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::from_str(s).with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn parse_month(s: &str) -> Result<Month> {
    match s.parse::<u8>() {
        Ok(n) => Month::try_from(n).map_err(|_| anyhow!("month must be 1-12, got {n}")),
        Err(_) => s.parse::<Month>().map_err(|_| anyhow!("unknown month '{s}'")),
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("empty command");
        };
        let rest = words.next();

        let command = match name.to_lowercase().as_str() {
            "open" => Command::Open,
            "close" => Command::Close,
            "click" => Command::Click(parse_date(arg(name, rest)?)?),
            "hover" => Command::Hover(parse_date(arg(name, rest)?)?),
            "leave" => Command::Leave,
            "prev" => Command::Jump(-1),
            "next" => Command::Jump(1),
            "jump" => {
                let n = arg(name, rest)?;
                Command::Jump(n.parse().with_context(|| format!("invalid month count '{n}'"))?)
            }
            "month" => Command::Month(parse_month(arg(name, rest)?)?),
            "year" => {
                let y = arg(name, rest)?;
                let year: i32 = y.parse().with_context(|| format!("invalid year '{y}'"))?;
                Command::Year(DisplayYear::new(year)?)
            }
            "preset" => {
                let n = arg(name, rest)?;
                let index: usize = n.parse().with_context(|| format!("invalid preset number '{n}'"))?;
                if index == 0 {
                    bail!("presets are numbered from 1");
                }
                Command::Preset(index - 1)
            }
            "ok" | "confirm" => Command::Confirm,
            "outside" => Command::Outside,
            "clear" => Command::Clear,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{other}', type 'help'"),
        };
        Ok(command)
    }
}

/// Everything the session needs besides the field itself.
pub struct Session<H> {
    hub: DismissHub,
    field: DateRangeField<H>,
    today: NaiveDate,
    presets: Vec<PredefinedRange>,
}

impl<H: SelectionHandler> Session<H> {
    pub fn new(field: DateRangeField<H>, today: NaiveDate, presets: Vec<PredefinedRange>) -> Self {
        Self {
            hub: DismissHub::new(),
            field,
            today,
            presets,
        }
    }

    pub fn field(&self) -> &DateRangeField<H> {
        &self.field
    }

    fn show(&self) {
        println!("[{}]", self.field.label());
        if let Some(picker) = self.field.picker() {
            print!("{}", render::picker(picker));
        }
    }

    fn open(&mut self) {
        self.field.open(&self.hub, self.today, self.presets.clone());
    }

    /// Dispatch an outside click and let the field react to it.
    pub fn dismiss(&mut self) {
        let notified = self.hub.click_outside();
        if self.field.poll_dismissal() {
            info!("picker dismissed, selection discarded");
        }
        debug!("outside click notified {notified} listener(s)");
    }

    fn require_open(&self) -> bool {
        if !self.field.is_open() {
            println!("Picker is closed, type 'open' first.");
        }
        self.field.is_open()
    }

    /// Apply one command. Returns false when the session should end.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Open => {
                self.open();
                self.show();
            }
            Command::Close => self.field.close(),
            Command::Clear => {
                self.field.clear();
                self.show();
            }
            Command::Outside => {
                self.dismiss();
                self.show();
            }
            Command::Show => self.show(),
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
            Command::Confirm => {
                if self.require_open() {
                    let confirmed = self
                        .field
                        .interact(|p| {
                            p.confirmation().map(|action| {
                                debug!("confirm {}", action.span());
                                action.confirm()
                            })
                        });
                    if confirmed.flatten().is_none() {
                        println!("Pick both a start and an end date first.");
                    }
                    self.show();
                }
            }
            Command::Preset(index) => {
                if self.require_open() {
                    if let Some(None) = self.field.interact(|p| p.select_preset(index)) {
                        println!("No preset number {}.", index + 1);
                    }
                    self.show();
                }
            }
            other => {
                if self.require_open() {
                    self.field.interact(|p| match other {
                        Command::Click(date) => {
                            let outcome = p.click(date);
                            debug!("click {date}: {outcome:?}");
                        }
                        Command::Hover(date) => p.hover(date),
                        Command::Leave => p.clear_hover(),
                        Command::Jump(delta) => p.navigate(delta),
                        Command::Month(month) => p.select_month(month),
                        Command::Year(year) => p.select_year(year),
                        _ => {}
                    });
                    self.show();
                }
            }
        }
        true
    }

    fn is_open(&self) -> bool {
        self.field.is_open()
    }
}

async fn idle(timeout: Option<Duration>) {
    match timeout {
        Some(timeout) => tokio::time::sleep(timeout).await,
        None => std::future::pending().await,
    }
}

/// Run the session until stdin closes, `quit`, or Ctrl-C.
///
/// Ctrl-C and the idle timer both act as a click outside the picker.
pub async fn run<H: SelectionHandler>(mut session: Session<H>, idle_timeout: Option<Duration>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    session.open();
    session.show();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                session.dismiss();
                break;
            }
            _ = idle(idle_timeout), if session.is_open() => {
                info!("idle timeout reached");
                session.dismiss();
                session.show();
                continue;
            }
        };

        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if !session.apply(command) {
                    break;
                }
            }
            Err(e) => println!("{e:#}"),
        }
    }

    Ok(())
}

/// Handler that prints each confirmed selection.
pub fn printer(json: bool) -> impl FnMut(&Confirmation) {
    move |confirmation: &Confirmation| {
        if json {
            match serde_json::to_string(confirmation) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!("failed to serialize selection: {e}"),
            }
        } else {
            println!("{}", render::confirmation(confirmation));
        }
    }
}
