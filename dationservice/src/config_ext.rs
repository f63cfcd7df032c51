//! Extension for storing the Dation account in dationconfig
//!
//! This module provides the `DationConfigExt` trait, which adds the Dation
//! account and calendar settings to `dationconfig::Config`.

use crate::calendar::DEFAULT_PRODID;
use anyhow::{Result, anyhow};
use dationconfig::Config;
use serde_yaml::Value;

const ACCOUNT_PATH: [&str; 2] = ["accounts", "dation"];

fn account_key(key: &'static str) -> [&'static str; 3] {
    [ACCOUNT_PATH[0], ACCOUNT_PATH[1], key]
}

/// Extension trait for the Dation settings of `dationconfig::Config`
///
/// # Example
///
/// ```rust,ignore
/// use dationconfig::get_config;
/// use dationservice::DationConfigExt;
///
/// let config = get_config();
/// let (username, password) = config.get_dation_credentials()?;
/// ```
pub trait DationConfigExt {
    /// Get the generic Dation SOAP endpoint used for the school lookup
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not configured
    fn get_soap_endpoint(&self) -> Result<String>;

    /// Set the generic Dation SOAP endpoint
    fn set_soap_endpoint(&self, endpoint: &str) -> Result<()>;

    /// Get the driving school handle
    fn get_school_handle(&self) -> Result<String>;

    /// Set the driving school handle
    fn set_school_handle(&self, handle: &str) -> Result<()>;

    /// Get the student's username
    fn get_dation_username(&self) -> Result<String>;

    /// Set the student's username
    fn set_dation_username(&self, username: &str) -> Result<()>;

    /// Get the student's password
    fn get_dation_password(&self) -> Result<String>;

    /// Set the student's password
    fn set_dation_password(&self, password: &str) -> Result<()>;

    /// Get (username, password)
    ///
    /// # Errors
    ///
    /// Returns an error if either of them is not configured
    fn get_dation_credentials(&self) -> Result<(String, String)>;

    /// Get the `PRODID` of generated calendars
    fn get_calendar_prodid(&self) -> String;
}

impl DationConfigExt for Config {
    fn get_soap_endpoint(&self) -> Result<String> {
        self.get_string(&account_key("soap_endpoint"))
            .ok_or_else(|| anyhow!("Dation SOAP endpoint not configured"))
    }

    fn set_soap_endpoint(&self, endpoint: &str) -> Result<()> {
        self.set_value(
            &account_key("soap_endpoint"),
            Value::String(endpoint.to_string()),
        )
    }

    fn get_school_handle(&self) -> Result<String> {
        self.get_string(&account_key("handle"))
            .ok_or_else(|| anyhow!("Dation school handle not configured"))
    }

    fn set_school_handle(&self, handle: &str) -> Result<()> {
        self.set_value(&account_key("handle"), Value::String(handle.to_string()))
    }

    fn get_dation_username(&self) -> Result<String> {
        self.get_string(&account_key("username"))
            .ok_or_else(|| anyhow!("Dation username not configured"))
    }

    fn set_dation_username(&self, username: &str) -> Result<()> {
        self.set_value(&account_key("username"), Value::String(username.to_string()))
    }

    fn get_dation_password(&self) -> Result<String> {
        self.get_string(&account_key("password"))
            .ok_or_else(|| anyhow!("Dation password not configured"))
    }

    fn set_dation_password(&self, password: &str) -> Result<()> {
        self.set_value(&account_key("password"), Value::String(password.to_string()))
    }

    fn get_dation_credentials(&self) -> Result<(String, String)> {
        let username = self.get_dation_username()?;
        let password = self.get_dation_password()?;
        Ok((username, password))
    }

    fn get_calendar_prodid(&self) -> String {
        self.get_string(&["calendar", "prodid"])
            .unwrap_or_else(|| DEFAULT_PRODID.to_string())
    }
}
