//! Command-line harness for exercising the X25519 key-exchange primitive.
//!
//! This binary is a thin wrapper and is not part of the crate's public API
//! or stability guarantees; it exists to let a caller poke the primitive
//! from a shell the way `example.c` does for the original C implementation
//! this workspace was ported from.

use clap::{Parser, Subcommand};
use x25519_dalek::{PublicKey, StaticSecret};

#[derive(Parser)]
#[command(name = "x25519-cli")]
#[command(about = "Exercise X25519 key generation and Diffie-Hellman key exchange")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random private/public key pair and print both as hex.
    Genkey,
    /// Derive the public key for a given 32-byte hex-encoded private scalar.
    Pubkey {
        /// Private scalar, 32 bytes, hex-encoded.
        private: String,
    },
    /// Derive the shared secret for a private scalar and a peer public key.
    Shared {
        /// Our private scalar, 32 bytes, hex-encoded.
        private: String,
        /// Peer's public key, 32 bytes, hex-encoded.
        peer_public: String,
    },
    /// Run the two-party exchange fixture this CLI was ported from,
    /// confirming both directions agree.
    Demo,
}

fn parse_key(label: &str, hex_str: &str) -> [u8; 32] {
    let bytes = hex::decode(hex_str)
        .unwrap_or_else(|e| panic!("{label} is not valid hex: {e}"));
    let array: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .unwrap_or_else(|_| panic!("{label} must be exactly 32 bytes, got {}", bytes.len()));
    array
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Genkey => {
            let secret = StaticSecret::random();
            let public = PublicKey::from(&secret);
            println!("private: {}", hex::encode(secret.to_bytes()));
            println!("public:  {}", hex::encode(public.to_bytes()));
        }
        Commands::Pubkey { private } => {
            let scalar = parse_key("private", &private);
            let secret = StaticSecret::from(scalar);
            let public = PublicKey::from(&secret);
            println!("{}", hex::encode(public.to_bytes()));
        }
        Commands::Shared {
            private,
            peer_public,
        } => {
            let scalar = parse_key("private", &private);
            let peer = parse_key("peer_public", &peer_public);
            let secret = StaticSecret::from(scalar);
            let shared = secret.diffie_hellman(&PublicKey::from(peer));
            if !shared.was_contributory() {
                log::warn!("shared secret is the all-zero non-contributory output");
            }
            println!("{}", hex::encode(shared.to_bytes()));
        }
        Commands::Demo => run_demo(),
    }
}

/// Ported from the original C `example.c`: two fixed private scalars derive
/// their public keys, then each combines its own private scalar with the
/// other's public key and the two resulting shared secrets are shown to
/// agree.
fn run_demo() {
    let priv1: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xAB, 0,
    ];
    let priv2: [u8; 32] = [
        0xCC, 0xCC, 0xCC, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xAB, 0,
    ];

    let secret1 = StaticSecret::from(priv1);
    let secret2 = StaticSecret::from(priv2);
    let public1 = PublicKey::from(&secret1);
    let public2 = PublicKey::from(&secret2);

    println!("Pubkey 1:");
    println!("{}", hex::encode(public1.to_bytes()));
    println!("Pubkey 2:");
    println!("{}", hex::encode(public2.to_bytes()));

    let shared1 = secret2.diffie_hellman(&public1);
    let shared2 = secret1.diffie_hellman(&public2);

    println!("Shared key 1:");
    println!("{}", hex::encode(shared1.to_bytes()));
    println!("Shared key 2:");
    println!("{}", hex::encode(shared2.to_bytes()));

    assert_eq!(shared1.as_bytes(), shared2.as_bytes());
}
