//! Session commands: `--whoami`, `--login`, `--logout`, `--appointments`.
//!
//! Each writes its report to `out` so it can be checked in tests.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::io::Write;

use crate::api::ApiClient;
use crate::auth::{self, current_identity, current_user_id, SessionStore};
use crate::error::MedicareError;
use crate::ui::helpers::format_date;

/// Turn a flow error into the report printed on stderr, with a hint on what
/// to do next.
fn report(context: &str, err: impl Into<MedicareError>) -> color_eyre::Report {
    let err = err.into();
    tracing::warn!(category = %err.category(), "{}: {}", context, err);
    eyre!("{}: {}\n{}", context, err.user_message(), err.recovery_hint())
}

pub async fn whoami<W: Write>(session: &SessionStore, out: &mut W) -> Result<()> {
    match current_identity(session).await {
        Some(claims) => {
            let name = claims.display_name().unwrap_or("(no name)");
            write!(out, "Signed in as {}", name)?;
            if let Some(email) = &claims.email {
                write!(out, " <{}>", email)?;
            }
            if let Some(sub) = &claims.sub {
                write!(out, " (id {})", sub)?;
            }
            writeln!(out)?;
        }
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

pub async fn logout<W: Write>(session: &SessionStore, out: &mut W) -> Result<()> {
    auth::logout(session).await;
    writeln!(out, "Signed out")?;
    Ok(())
}

pub async fn login<W: Write>(
    api: &ApiClient,
    session: &SessionStore,
    email: &str,
    password: &str,
    out: &mut W,
) -> Result<()> {
    auth::login(api, session, email, password)
        .await
        .map_err(|e| report("Login failed", e))?;
    writeln!(out, "Signed in as {}", email.trim())?;
    Ok(())
}

pub async fn appointments<W: Write>(
    api: &ApiClient,
    session: &SessionStore,
    out: &mut W,
) -> Result<()> {
    let patient_id = current_user_id(session)
        .await
        .ok_or_else(|| eyre!("Not signed in. Run `medicare --login <email>` first."))?;

    let appointments = api
        .patient_appointments(&patient_id)
        .await
        .map_err(|e| report("Could not load appointments", e))?;

    if appointments.is_empty() {
        writeln!(out, "No appointments found")?;
        return Ok(());
    }

    for appointment in &appointments {
        writeln!(
            out,
            "{:<18} {:<9} {:<24} {:<18} {}",
            format_date(&appointment.appointment_date),
            appointment.appointment_time,
            appointment.doctor_name,
            appointment.specialty,
            appointment.status
        )?;
    }
    Ok(())
}
