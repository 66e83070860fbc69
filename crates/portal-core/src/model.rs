//! Shared data types for the configuration portal.
//!
//! These types describe what crosses the boundary between the HTTP server
//! and the Wi-Fi manager: credentials submitted through the portal page and
//! the snapshot payloads the manager publishes for the page to poll.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum SSID length in bytes.
pub const MAX_SSID_LEN: usize = 32;

/// Maximum password length in bytes.
pub const MAX_PASSWORD_LEN: usize = 64;

/// Errors produced when validating submitted Wi-Fi credentials.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// The SSID was empty.
    #[error("ssid cannot be empty")]
    EmptySsid,

    /// The SSID exceeded [`MAX_SSID_LEN`] bytes.
    #[error("ssid exceeds {MAX_SSID_LEN} bytes")]
    SsidTooLong,

    /// The password exceeded [`MAX_PASSWORD_LEN`] bytes.
    #[error("password exceeds {MAX_PASSWORD_LEN} bytes")]
    PasswordTooLong,
}

/// Wi-Fi credentials submitted through the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Network name.
    pub ssid: String,

    /// Network password (empty for open networks).
    pub password: String,
}

impl Credentials {
    /// Validate and build credentials from raw header values.
    ///
    /// The SSID must be non-empty and within [`MAX_SSID_LEN`]; the password
    /// may be empty but must be within [`MAX_PASSWORD_LEN`]. Lengths are
    /// byte lengths, matching what the Wi-Fi driver stores.
    pub fn new(ssid: &str, password: &str) -> Result<Self, CredentialError> {
        if ssid.is_empty() {
            return Err(CredentialError::EmptySsid);
        }
        if ssid.len() > MAX_SSID_LEN {
            return Err(CredentialError::SsidTooLong);
        }
        if password.len() > MAX_PASSWORD_LEN {
            return Err(CredentialError::PasswordTooLong);
        }
        Ok(Self {
            ssid: ssid.to_string(),
            password: password.to_string(),
        })
    }
}

/// One scanned access point, as published in the AP-list snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    /// Network name.
    pub ssid: String,

    /// Radio channel.
    pub chan: u8,

    /// Received signal strength in dBm.
    pub rssi: i8,

    /// Authentication mode as reported by the radio driver.
    pub auth: u8,
}

/// Current address assignment, as published in the IP-info snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpInfo {
    /// SSID of the network the station is associated with.
    pub ssid: String,

    /// Assigned station address.
    pub ip: String,

    /// Network mask.
    pub netmask: String,

    /// Gateway address.
    pub gw: String,

    /// Update reason code reported by the Wi-Fi manager.
    pub urc: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_credentials() {
        let credentials = Credentials::new("HomeNetwork", "hunter22").unwrap();
        assert_eq!(credentials.ssid, "HomeNetwork");
        assert_eq!(credentials.password, "hunter22");
    }

    #[test]
    fn test_open_network_password_may_be_empty() {
        let credentials = Credentials::new("CoffeeShop", "").unwrap();
        assert_eq!(credentials.password, "");
    }

    #[test]
    fn test_empty_ssid_rejected() {
        assert_eq!(Credentials::new("", "pw"), Err(CredentialError::EmptySsid));
    }

    #[test]
    fn test_oversized_ssid_rejected() {
        let ssid = "s".repeat(MAX_SSID_LEN + 1);
        assert_eq!(
            Credentials::new(&ssid, "pw"),
            Err(CredentialError::SsidTooLong)
        );
    }

    #[test]
    fn test_ssid_at_limit_accepted() {
        let ssid = "s".repeat(MAX_SSID_LEN);
        assert!(Credentials::new(&ssid, "pw").is_ok());
    }

    #[test]
    fn test_oversized_password_rejected() {
        let password = "p".repeat(MAX_PASSWORD_LEN + 1);
        assert_eq!(
            Credentials::new("net", &password),
            Err(CredentialError::PasswordTooLong)
        );
    }

    #[test]
    fn test_access_point_serializes_with_short_field_names() {
        let ap = AccessPoint {
            ssid: "HomeNetwork".to_string(),
            chan: 6,
            rssi: -42,
            auth: 3,
        };

        let json = serde_json::to_string(&ap).unwrap();
        assert!(json.contains("\"ssid\":\"HomeNetwork\""));
        assert!(json.contains("\"chan\":6"));
        assert!(json.contains("\"rssi\":-42"));
        assert!(json.contains("\"auth\":3"));
    }

    #[test]
    fn test_ip_info_round_trip() {
        let info = IpInfo {
            ssid: "HomeNetwork".to_string(),
            ip: "192.168.1.50".to_string(),
            netmask: "255.255.255.0".to_string(),
            gw: "192.168.1.1".to_string(),
            urc: 0,
        };

        let json = serde_json::to_string(&info).unwrap();
        let decoded: IpInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, info);
    }
}
