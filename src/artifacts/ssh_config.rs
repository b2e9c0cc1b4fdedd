use crate::error::Result;
use crate::utils::fs::atomic_write;
use std::path::Path;

pub const FILE_NAME: &str = "ssh_config";

/// Render the SSH client config placed in the config directory.
///
/// Host key checking is disabled for testbed resources; connections to
/// anything other than the bastion itself are routed through the bastion
/// as a jump host. The user name is left as a placeholder for manual edit.
pub fn render(bastion_host: &str, bastion_key_path: &Path) -> String {
    format!(
        "UserKnownHostsFile /dev/null\n\
         StrictHostKeyChecking no\n\
         ServerAliveInterval 120\n\
         Host {bastion}\n\
         User <Update Bastion User Name>\n\
         ForwardAgent yes\n\
         Hostname %h\n\
         IdentityFile {key}\n\
         IdentitiesOnly yes\n\
         Host * !{bastion}\n\
         ProxyJump <Update Bastion User Name>@{bastion}:22\n",
        bastion = bastion_host,
        key = bastion_key_path.display(),
    )
}

pub fn write(path: &Path, bastion_host: &str, bastion_key_path: &Path) -> Result<()> {
    atomic_write(path, &render(bastion_host, bastion_key_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_render_parameterizes_bastion_and_key() {
        let rendered = render(
            "bastion.example.net",
            &PathBuf::from("/cfg/bastion_key"),
        );

        assert!(rendered.contains("Host bastion.example.net\n"));
        assert!(rendered.contains("IdentityFile /cfg/bastion_key\n"));
        assert!(rendered.contains("Host * !bastion.example.net\n"));
        assert!(rendered
            .contains("ProxyJump <Update Bastion User Name>@bastion.example.net:22\n"));
    }

    #[test]
    fn test_render_disables_host_key_checking() {
        let rendered = render("b.example.net", &PathBuf::from("/cfg/key"));

        assert!(rendered.starts_with("UserKnownHostsFile /dev/null\n"));
        assert!(rendered.contains("StrictHostKeyChecking no\n"));
        assert!(rendered.contains("ServerAliveInterval 120\n"));
    }
}
