//! Command-line front door.
//!
//! The host invocation hands us the shared content as arguments: a title,
//! a body (inline, from a file, or from stdin), a post status, and any
//! image attachments. Attachments are staged before the UI starts so the
//! publish flow owns their lifetime.

use crate::share::{PostStatus, ShareData};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "sharepost",
    version,
    about = "Share text and images to one of your sites"
)]
pub struct Cli {
    /// Post title
    #[arg(short, long)]
    pub title: String,

    /// Post body text; use --body-file or pipe via stdin instead for
    /// longer content
    #[arg(short, long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the post body from a file
    #[arg(long, value_name = "FILE")]
    pub body_file: Option<PathBuf>,

    /// Post status to publish with
    #[arg(short, long, value_enum, default_value_t = PostStatus::Draft)]
    pub status: PostStatus,

    /// Image attachment; may be given multiple times
    #[arg(short = 'a', long = "attach", value_name = "IMAGE")]
    pub attachments: Vec<PathBuf>,
}

impl Cli {
    /// Build the shared content, staging attachments under `staging_root`.
    pub fn into_share_data(self, staging_root: &Path) -> Result<ShareData> {
        let body = match (self.body, &self.body_file) {
            (Some(body), _) => body,
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read body file {}", path.display()))?,
            (None, None) => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read post body from stdin")?;
                buffer
            }
        };

        for attachment in &self.attachments {
            anyhow::ensure!(
                attachment.is_file(),
                "Attachment not found: {}",
                attachment.display()
            );
        }

        let mut share = ShareData::new(self.title, body, self.status);
        share.stage_attachments(&self.attachments, staging_root)?;
        Ok(share)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn body_file_populates_body() {
        let dir = tempfile::TempDir::new().unwrap();
        let body_path = dir.path().join("body.txt");
        std::fs::write(&body_path, "hello from a file").unwrap();

        let cli = Cli::parse_from([
            "sharepost",
            "--title",
            "My post",
            "--body-file",
            body_path.to_str().unwrap(),
        ]);
        let share = cli.into_share_data(dir.path()).unwrap();
        assert_eq!(share.body, "hello from a file");
        assert_eq!(share.status, PostStatus::Draft);
        assert!(!share.has_media());
    }

    #[test]
    fn missing_attachment_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let cli = Cli::parse_from([
            "sharepost",
            "--title",
            "t",
            "--body",
            "b",
            "--attach",
            "/nonexistent/image.png",
        ]);
        assert!(cli.into_share_data(dir.path()).is_err());
    }

    #[test]
    fn status_flag_is_parsed() {
        let cli = Cli::parse_from(["sharepost", "--title", "t", "--body", "b", "--status", "publish"]);
        assert_eq!(cli.status, PostStatus::Publish);
    }
}
