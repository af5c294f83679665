//! Line-mode login for terminals where the full-screen form is unwanted.
//!
//! Fields are asked for one at a time and checked as they come in, so a bad
//! username is reported before the password prompt. Nothing that fails those
//! checks reaches the gate.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use logingate_core::auth::{validate_password, validate_username};
use logingate_core::{LoginGate, LoginOutcome};

use crate::utils::format_attempts_left;

/// Run the prompt loop on stdin/stdout until login succeeds or the gate locks
pub fn run(gate: &mut LoginGate) -> Result<LoginOutcome> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_with(gate, &mut stdin.lock(), &mut stdout, || {
        rpassword::prompt_password("Password: ")
    })
}

pub fn run_with<R, W, P>(
    gate: &mut LoginGate,
    input: &mut R,
    output: &mut W,
    mut read_password: P,
) -> Result<LoginOutcome>
where
    R: BufRead,
    W: Write,
    P: FnMut() -> io::Result<String>,
{
    writeln!(output, "\n=== Login ===\n")?;

    loop {
        if gate.is_locked() {
            writeln!(output, "ACCOUNT LOCKED!")?;
            return Ok(LoginOutcome::Locked);
        }

        writeln!(output, "{}", format_attempts_left(gate.attempts_remaining()))?;

        let username = prompt_username(input, output)?;
        if let Err(e) = validate_username(&username) {
            writeln!(output, "{}", e)?;
            continue;
        }

        let password = read_password()?;
        if let Err(e) = validate_password(&password) {
            writeln!(output, "{}", e)?;
            continue;
        }

        match gate.attempt(&username, &password) {
            Ok(LoginOutcome::Success) => {
                writeln!(output, "Login successful!")?;
                return Ok(LoginOutcome::Success);
            }
            Ok(LoginOutcome::Rejected { attempts_remaining }) => {
                writeln!(
                    output,
                    "Wrong credentials! {} attempts left.\n",
                    attempts_remaining
                )?;
            }
            // Reported at the top of the loop
            Ok(LoginOutcome::Locked) => {}
            Err(e) => {
                writeln!(output, "{}", e)?;
            }
        }
    }
}

fn prompt_username<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "Username: ")?;
    output.flush()?;

    let mut username = String::new();
    if input.read_line(&mut username)? == 0 {
        bail!("Input closed before login completed");
    }
    Ok(username.trim().to_string())
}
