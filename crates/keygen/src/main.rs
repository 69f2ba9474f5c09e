//! `keygen` — operator tool that prints a fresh master key.
//!
//! Run once when provisioning a deployment and place the printed value in
//! the `MASTER_KEY` environment variable. The key is 32 random bytes from
//! the OS CSPRNG, hex-encoded, written to stdout and nowhere else; nothing
//! is persisted and nothing is read back programmatically.
//!
//! Not reachable from any request-handling path.

use secret_envelope::MasterKey;

fn main() {
    println!("{}", MasterKey::generate().to_hex());
}
