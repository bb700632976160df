use std::io::{BufRead, Write};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::cli::output;
use crate::core::BankManager;
use crate::currency::parse_amount;
use crate::errors::{BankError, Result};

const UNEXPECTED_ERROR: &str =
    "Sorry! Something unexpected happened. Check the logs or contact the developer for assistance.";

/// Menu-driven shell over the bank manager. Input and output are injected
/// so tests can drive a whole session from a string.
pub struct Shell<R, W> {
    manager: BankManager,
    selected: Option<i64>,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(manager: BankManager, input: R, out: W) -> Self {
        Self {
            manager,
            selected: None,
            input,
            out,
        }
    }

    /// Displays the menu and responds to choices until quit or end of
    /// input. Domain rejections are reported and the loop continues;
    /// anything unclassified is logged, reported generically, and the loop
    /// continues as well. Only I/O failures on the output itself abort.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.display_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };
            let choice = line.trim();
            let outcome = match choice {
                "1" => self.open_account(),
                "2" => self.summary(),
                "3" => self.select_account(),
                "4" => self.add_transaction(),
                "5" => self.list_transactions(),
                "6" => self.interest_and_fees(),
                "7" => break,
                other => {
                    writeln!(self.out, "{} is not a valid choice", other)?;
                    Ok(())
                }
            };
            if let Err(err) = outcome {
                match err {
                    BankError::Io(io_err) => return Err(BankError::Io(io_err)),
                    other => {
                        tracing::error!("unexpected error: {}", other);
                        writeln!(self.out, "{}", output::error_text(UNEXPECTED_ERROR))?;
                    }
                }
            }
        }
        Ok(())
    }

    fn display_menu(&mut self) -> Result<()> {
        let selected = match self.selected.and_then(|n| self.manager.account(n)) {
            Some(account) => account.to_string(),
            None => "None".to_string(),
        };
        writeln!(self.out, "--------------------------------")?;
        writeln!(self.out, "Currently selected account: {}", selected)?;
        writeln!(self.out, "Enter command")?;
        writeln!(self.out, "1: open account")?;
        writeln!(self.out, "2: summary")?;
        writeln!(self.out, "3: select account")?;
        writeln!(self.out, "4: add transaction")?;
        writeln!(self.out, "5: list transactions")?;
        writeln!(self.out, "6: interest and fees")?;
        writeln!(self.out, "7: quit")?;
        write!(self.out, ">")?;
        self.out.flush()?;
        Ok(())
    }

    fn open_account(&mut self) -> Result<()> {
        let Some(kind) = self.prompt("Type of account? (checking/savings)")? else {
            return Ok(());
        };
        let kind = kind.trim().to_ascii_lowercase();
        if kind != "checking" && kind != "savings" {
            // anything else drops back to the menu
            return Ok(());
        }
        self.manager.open_account(&kind)?;
        Ok(())
    }

    fn summary(&mut self) -> Result<()> {
        for line in self.manager.account_summaries() {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn select_account(&mut self) -> Result<()> {
        let Some(raw) = self.prompt("Enter account number")? else {
            return Ok(());
        };
        match raw.trim().parse::<i64>() {
            Ok(number) => {
                // selecting an absent account clears the selection
                self.selected = self.manager.account(number).map(|a| a.number());
            }
            Err(_) => {
                writeln!(
                    self.out,
                    "{}",
                    output::warning_text("Please enter a valid account number.")
                )?;
            }
        }
        Ok(())
    }

    fn add_transaction(&mut self) -> Result<()> {
        let Some(number) = self.require_selection()? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_amount()? else {
            return Ok(());
        };
        let Some(date) = self.prompt_date()? else {
            return Ok(());
        };
        match self.manager.add_transaction(number, amount, date) {
            Ok(()) => Ok(()),
            Err(BankError::Overdraw) => {
                self.report(
                    "This transaction could not be completed due to an insufficient account balance.",
                )
            }
            Err(BankError::TransactionLimit { scope, limit }) => {
                let message = format!(
                    "This transaction could not be completed because this account already has {} transactions in this {}.",
                    limit, scope
                );
                self.report(&message)
            }
            Err(BankError::TransactionSequence { latest }) => {
                self.report(&format!("New transactions must be from {} onward.", latest))
            }
            Err(other) => Err(other),
        }
    }

    fn list_transactions(&mut self) -> Result<()> {
        let Some(number) = self.require_selection()? else {
            return Ok(());
        };
        let lines: Vec<String> = self
            .manager
            .transactions(number)?
            .iter()
            .map(|t| t.to_string())
            .collect();
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn interest_and_fees(&mut self) -> Result<()> {
        let Some(number) = self.require_selection()? else {
            return Ok(());
        };
        match self.manager.assess_interest_and_fees(number) {
            Ok(()) => {
                tracing::debug!("triggered interest and fees");
                Ok(())
            }
            Err(BankError::TransactionSequence { latest }) => {
                let message = format!(
                    "Cannot apply interest and fees again in the month of {}.",
                    latest.format("%B")
                );
                self.report(&message)
            }
            Err(BankError::NoTransactions) => {
                self.report("This account has no transactions to assess.")
            }
            Err(other) => Err(other),
        }
    }

    /// The selected account's number, or a reminder to select one first.
    fn require_selection(&mut self) -> Result<Option<i64>> {
        match self.selected {
            Some(number) => Ok(Some(number)),
            None => {
                writeln!(
                    self.out,
                    "This command requires that you first select an account."
                )?;
                Ok(None)
            }
        }
    }

    fn prompt_amount(&mut self) -> Result<Option<Decimal>> {
        loop {
            let Some(raw) = self.prompt("Amount?")? else {
                return Ok(None);
            };
            match parse_amount(&raw) {
                Some(amount) => return Ok(Some(amount)),
                None => {
                    writeln!(
                        self.out,
                        "{}",
                        output::warning_text("Please try again with a valid dollar amount.")
                    )?;
                }
            }
        }
    }

    fn prompt_date(&mut self) -> Result<Option<NaiveDate>> {
        loop {
            let Some(raw) = self.prompt("Date? (YYYY-MM-DD)")? else {
                return Ok(None);
            };
            match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(date) => return Ok(Some(date)),
                Err(_) => {
                    writeln!(
                        self.out,
                        "{}",
                        output::warning_text(
                            "Please try again with a valid date in the format YYYY-MM-DD."
                        )
                    )?;
                }
            }
        }
    }

    fn report(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", output::error_text(message))?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        writeln!(self.out, "{}", text)?;
        write!(self.out, ">")?;
        self.out.flush()?;
        self.read_line()
    }

    /// One line of input; `None` on end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
