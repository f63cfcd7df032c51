//! # dationservice - Dation client and calendar export
//!
//! This crate talks to the Dation driving-school SOAP service through
//! `dationsoap` and turns a student's planned lessons into an iCalendar feed.
//!
//! ## Overview
//!
//! - [`DationClient`]: school lookup, student login, courses, agenda, address
//! - [`calendar`]: RFC 5545 rendering of a [`Schedule`]
//! - [`DationConfigExt`]: account settings stored in `dationconfig`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use dationconfig::get_config;
//! use dationservice::{DationClient, DationConfigExt, calendar};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = get_config();
//!     let (username, password) = config.get_dation_credentials()?;
//!
//!     let schedule = DationClient::new().fetch_schedule(
//!         &config.get_soap_endpoint()?,
//!         &config.get_school_handle()?,
//!         &username,
//!         &password,
//!     )?;
//!
//!     let ics = calendar::render_calendar(&schedule, &config.get_calendar_prodid(), &Utc::now());
//!     println!("{}", ics);
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod client;
pub mod config_ext;
pub mod error;
pub mod models;

pub use client::DationClient;
pub use config_ext::DationConfigExt;
pub use error::{DationError, Result};
pub use models::{Address, AgendaItem, CourseInfo, DrivingSchoolInfo, LoginInfo, Schedule};
