use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ftk_core::FigmaInput;
use ftk_pack::SaveOptions;

#[derive(Parser)]
#[command(name = "figma-toolkit")]
#[command(about = "Turn Figma components into SVG icon packs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Figma personal access token
    #[arg(
        short,
        long,
        global = true,
        env = "FIGMA_ACCESS_TOKEN",
        hide_env_values = true
    )]
    pub access_token: Option<String>,

    /// Export cache file (overrides config)
    #[arg(long, global = true)]
    pub cache: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an SVG icon pack (JSON) from one page
    Generate {
        /// Figma file ID
        file_id: String,

        /// Figma page name
        page_name: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export components as a JSON icon pack
    Export {
        /// Figma file page "FILE_ID/PAGE_NAME"
        input: FigmaInput,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Download components to individual SVG documents
    Download {
        /// Figma file page "FILE_ID/PAGE_NAME"
        input: FigmaInput,

        /// Output directory (current directory when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        icon: IconArgs,
    },

    /// Generate a React icon component
    React {
        /// Figma file page "FILE_ID/PAGE_NAME"
        input: FigmaInput,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate Angular component templates from components.json
    Component {
        /// Path to components.json
        input: PathBuf,
    },
}

/// Attributes of the `<svg>` element written for each icon
#[derive(Args, Debug, Default)]
pub struct IconArgs {
    /// Icon width
    #[arg(long)]
    pub width: Option<String>,

    /// Icon height
    #[arg(long)]
    pub height: Option<String>,

    /// Icon viewBox
    #[arg(long)]
    pub view_box: Option<String>,

    /// Icon fill
    #[arg(long)]
    pub fill: Option<String>,

    /// Icon class name
    #[arg(long)]
    pub class_name: Option<String>,
}

impl IconArgs {
    pub fn save_options(&self) -> SaveOptions {
        let defaults = SaveOptions::default();
        SaveOptions {
            width: self.width.clone().unwrap_or(defaults.width),
            height: self.height.clone().unwrap_or(defaults.height),
            view_box: self.view_box.clone().unwrap_or(defaults.view_box),
            fill: self.fill.clone().unwrap_or(defaults.fill),
            class_name: self.class_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_download() {
        let cli = Cli::try_parse_from([
            "figma-toolkit",
            "download",
            "abc/Icons",
            "-o",
            "out",
            "--width",
            "32",
            "--class-name",
            "icon",
            "--access-token",
            "secret",
        ])
        .unwrap();

        assert_eq!(cli.access_token.as_deref(), Some("secret"));
        match cli.command {
            Commands::Download {
                input,
                output,
                icon,
            } => {
                assert_eq!(input.file, "abc");
                assert_eq!(input.page.as_deref(), Some("Icons"));
                assert_eq!(output, Some(PathBuf::from("out")));
                let options = icon.save_options();
                assert_eq!(options.width, "32");
                assert_eq!(options.height, "24");
                assert_eq!(options.class_name.as_deref(), Some("icon"));
            }
            _ => panic!("expected download"),
        }
    }

    #[test]
    fn test_parse_export_whole_file() {
        let cli = Cli::try_parse_from(["figma-toolkit", "export", "abc", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Export { input, output } => {
                assert_eq!(input.file, "abc");
                assert!(input.page.is_none());
                assert!(output.is_none());
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_react_requires_output() {
        assert!(Cli::try_parse_from(["figma-toolkit", "react", "abc/Icons"]).is_err());
    }
}
