//! Line-oriented front end
//!
//! Each input line becomes a [`Command`]; the [`App`] applies it to the
//! paginator and the booking controller and prints the result.

use crate::api::RentalApi;
use crate::booking::{BookingController, DateField, SuccessSignal};
use crate::catalog::Paginator;
use crate::models::{Property, PropertyId};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Everything the user can type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Next,
    Prev,
    Book(PropertyId),
    Set(DateField, String),
    Submit,
    Cancel,
    Bookings,
    Reload,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "list" | "ls" => Command::List,
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "book" => {
                let id = rest
                    .parse()
                    .map_err(|_| format!("usage: book <property id>, got `{}`", rest))?;
                Command::Book(id)
            }
            "in" => Command::Set(DateField::CheckIn, rest.to_string()),
            "out" => Command::Set(DateField::CheckOut, rest.to_string()),
            "set" => {
                let (name, value) = rest
                    .split_once(char::is_whitespace)
                    .unwrap_or((rest, ""));
                let field = name.parse::<DateField>().map_err(|e| e.to_string())?;
                Command::Set(field, value.trim().to_string())
            }
            "submit" => Command::Submit,
            "cancel" => Command::Cancel,
            "bookings" => Command::Bookings,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "" => return Err("empty command".to_string()),
            other => return Err(format!("unknown command `{}`, try `help`", other)),
        };

        Ok(command)
    }
}

pub const HELP: &str = "\
Commands:
  list | ls              show the current page
  next | prev            move between pages
  book <id>              open the booking form for a property on this page
  in <date>              set the check-in date
  out <date>             set the check-out date
  set <field> <value>    set check_in_date or check_out_date
  submit                 send the booking
  cancel                 close the booking form
  bookings               list existing bookings
  reload                 fetch the catalog again
  quit";

/// Terminal application state
pub struct App {
    api: Arc<dyn RentalApi>,
    pub paginator: Paginator,
    pub booking: BookingController,
    pub catalog_loaded_at: Option<DateTime<Utc>>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        api: Arc<dyn RentalApi>,
        user_id: i64,
        page_size: usize,
        feedback: SuccessSignal,
    ) -> Self {
        let booking = BookingController::new(Arc::clone(&api), user_id, feedback);
        Self {
            api,
            paginator: Paginator::new(page_size),
            booking,
            catalog_loaded_at: None,
            should_quit: false,
        }
    }

    /// Fetch the catalog; on failure the current collection is kept
    pub async fn load_catalog(&mut self) {
        info!(source = self.api.source_name(), "Fetching property catalog");

        match self.api.fetch_properties().await {
            Ok(properties) => {
                info!("✅ Loaded {} properties", properties.len());
                self.paginator.load(properties);
                self.catalog_loaded_at = Some(Utc::now());
            }
            Err(e) => error!(error = %e, "Error fetching properties"),
        }
    }

    /// Apply one command and return the text to print
    pub async fn handle(&mut self, command: Command) -> String {
        match command {
            Command::List => self.render_page(),
            Command::Next => {
                if !self.paginator.next() {
                    return "Already on the last page".to_string();
                }
                self.render_page()
            }
            Command::Prev => {
                if !self.paginator.prev() {
                    return "Already on the first page".to_string();
                }
                self.render_page()
            }
            Command::Book(id) => match self.paginator.find_on_page(id) {
                Some(property) => {
                    let property = property.clone();
                    self.booking.select_property(&property);
                    self.render_form(&property)
                }
                None => format!("No property with id {} on this page", id),
            },
            Command::Set(field, value) => match self.booking.change_field(field, value) {
                Ok(()) => self.render_dates(),
                Err(e) => e.to_string(),
            },
            Command::Submit => self.submit(),
            Command::Cancel => {
                self.booking.cancel();
                "Booking form closed".to_string()
            }
            Command::Bookings => self.render_bookings().await,
            Command::Reload => {
                self.load_catalog().await;
                self.render_page()
            }
            Command::Help => HELP.to_string(),
            Command::Quit => {
                self.should_quit = true;
                "Bye".to_string()
            }
        }
    }

    /// Both dates are required before anything is sent
    fn submit(&mut self) -> String {
        let state = self.booking.state();
        if state.is_drafting() && !state.dates().is_complete() {
            return "Check-in and check-out dates are required".to_string();
        }

        match self.booking.submit() {
            Ok(pending) => {
                let reply = format!(
                    "Booking request #{} sent for property {}",
                    pending.seq, pending.request.property_id
                );
                // Failures stay off screen; only the success banner is shown.
                let seq = pending.seq;
                tokio::spawn(async move {
                    if let Err(e) = pending.outcome().await {
                        debug!(seq, error = %e, "Booking failed after the form closed");
                    }
                });
                reply
            }
            Err(e) => e.to_string(),
        }
    }

    pub fn render_page(&self) -> String {
        if self.paginator.is_empty() {
            return "No properties loaded".to_string();
        }

        let first = self.paginator.window_start();
        let shown = self.paginator.current_window().len();
        let mut out = format!(
            "Properties (page {}/{}, {}-{} of {}, {} per page)\n",
            self.paginator.current_page(),
            self.paginator.page_count(),
            first,
            first + shown.saturating_sub(1),
            self.paginator.len(),
            self.paginator.page_size()
        );
        for (i, property) in self.paginator.current_window().iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. [{}] {} - {} (${})",
                first + i,
                property.id,
                property.title,
                property.location,
                property.price
            );
        }
        out.trim_end().to_string()
    }

    fn render_form(&self, property: &Property) -> String {
        format!(
            "Booking form for {} ({})\n{}",
            property.title,
            property.location,
            self.render_dates()
        )
    }

    fn render_dates(&self) -> String {
        let dates = self.booking.state().dates();
        format!(
            "  Check-in:  {}\n  Check-out: {}",
            dates.check_in_date, dates.check_out_date
        )
    }

    async fn render_bookings(&self) -> String {
        match self.api.fetch_bookings().await {
            Ok(bookings) if bookings.is_empty() => "No bookings yet".to_string(),
            Ok(bookings) => {
                let mut out = String::from("Bookings\n");
                for booking in &bookings {
                    let _ = writeln!(
                        out,
                        "  Property ID: {}  User ID: {}  Check-in: {}  Check-out: {}",
                        booking.property_id,
                        booking.user_id,
                        booking.check_in_date,
                        booking.check_out_date
                    );
                }
                out.trim_end().to_string()
            }
            Err(e) => {
                warn!(error = %e, "Error fetching bookings");
                "Could not fetch bookings".to_string()
            }
        }
    }
}
