//! Contact address - obfuscated storage and mail client launch.
//!
//! The address is XOR-scrambled so it never appears as a plain string in the
//! binary. This is scraper deterrence, not security; decoding is trivial and
//! meant to be.

use std::process::Command;

use log::debug;

const XOR_KEY: u8 = 0x5A;

/// "debsharmatrishit@gmail.com", XOR-scrambled with [`XOR_KEY`].
const SCRAMBLED_ADDRESS: [u8; 26] = [
    0x3E, 0x3F, 0x38, 0x29, 0x32, 0x3B, 0x28, 0x37, 0x3B, 0x2E, 0x28, 0x33, 0x29, 0x32, 0x33,
    0x2E, 0x1A, 0x3D, 0x37, 0x3B, 0x33, 0x36, 0x74, 0x39, 0x35, 0x37,
];

/// Decode the contact address.
pub fn contact_address() -> String {
    SCRAMBLED_ADDRESS
        .iter()
        .map(|&b| (b ^ XOR_KEY) as char)
        .collect()
}

/// Hand a target (URL or `mailto:`) to the platform opener. Best-effort: a
/// missing opener is logged and otherwise ignored, matching the "no action
/// here is fatal" stance of the contact flow.
pub fn launch_url(target: &str) -> bool {
    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(target).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", "", target]).spawn()
    } else {
        Command::new("xdg-open").arg(target).spawn()
    };

    match result {
        Ok(mut child) => {
            // The opener exits as soon as the target is handed off; reap it
            // off the main thread so it cannot linger as a zombie.
            std::thread::spawn(move || match child.wait() {
                Ok(status) if !status.success() => {
                    debug!("opener exited with {status}");
                }
                Err(err) => debug!("opener wait failed: {err}"),
                Ok(_) => {}
            });
            true
        }
        Err(err) => {
            debug!("launch failed: {err}");
            false
        }
    }
}

/// Launch the system mail client for an address.
pub fn launch_mailto(address: &str) -> bool {
    launch_url(&format!("mailto:{address}"))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_to_valid_address() {
        let address = contact_address();
        assert_eq!(address, "debsharmatrishit@gmail.com");
    }

    #[test]
    fn test_scrambled_bytes_are_not_plaintext() {
        let plain = contact_address();
        assert_ne!(SCRAMBLED_ADDRESS.as_slice(), plain.as_bytes());
        // No '@' byte visible in the scrambled form.
        assert!(!SCRAMBLED_ADDRESS.contains(&b'@'));
    }
}
