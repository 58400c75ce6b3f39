//! `roomuri decode <uri>` – human-readable form of a URI.

use roomuri_core::params::decoded_uri;

pub fn run_decode(uri: &str) -> String {
    decoded_uri(uri)
}
