use crate::error::{InitError, Result};
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

/// A generated SSH keypair in its structured form.
///
/// `name` is the algorithm token from the public line (e.g. `ssh-rsa`),
/// `public_key` is the base64 body. The full public line serializes as
/// `{name} {public_key} {comment}`.
#[derive(Debug, Clone)]
pub struct SshKeypair {
    pub name: String,
    pub private_key: String,
    pub public_key: String,
    pub comment: String,
}

impl SshKeypair {
    pub fn public_line(&self) -> String {
        format!("{} {} {}", self.name, self.public_key, self.comment)
    }
}

/// Key-generation capability.
pub trait KeyGenerator {
    fn generate(&self, comment: &str) -> Result<SshKeypair>;
}

/// Production generator shelling out to `ssh-keygen`.
pub struct SshKeygen;

impl SshKeygen {
    /// Check if ssh-keygen is installed
    pub fn is_installed() -> bool {
        which::which("ssh-keygen").is_ok()
    }
}

impl KeyGenerator for SshKeygen {
    fn generate(&self, comment: &str) -> Result<SshKeypair> {
        if !Self::is_installed() {
            return Err(InitError::KeygenNotInstalled);
        }

        let dir = tempfile::tempdir()?;
        let key_path = dir.path().join("id_rsa");

        let status = Command::new("ssh-keygen")
            .arg("-q")
            .args(["-t", "rsa"])
            .args(["-b", "3072"])
            .args(["-N", ""])
            .args(["-C", comment])
            .arg("-f")
            .arg(&key_path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| InitError::Keygen(format!("Failed to run ssh-keygen: {}", e)))?;

        if !status.success() {
            return Err(InitError::Keygen(format!(
                "ssh-keygen exited with status {}",
                status
            )));
        }

        let private_key = fs::read_to_string(&key_path)?;
        let public_line = fs::read_to_string(key_path.with_extension("pub"))?;
        parse_public_line(&public_line, private_key)
    }
}

fn parse_public_line(line: &str, private_key: String) -> Result<SshKeypair> {
    let mut parts = line.trim().splitn(3, ' ');
    let (Some(name), Some(public_key)) = (parts.next(), parts.next()) else {
        return Err(InitError::Keygen(format!(
            "Unexpected public key line: {}",
            line.trim()
        )));
    };

    Ok(SshKeypair {
        name: name.to_string(),
        private_key,
        public_key: public_key.to_string(),
        comment: parts.next().unwrap_or_default().to_string(),
    })
}
