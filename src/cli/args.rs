//! Command-line interface definitions.

use crate::commerce::types::CartLineInput;
use crate::image::options::{Crop, Dpr, Format, Gravity, Quality};
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Product landing page toolkit: image URLs, Shopify data, site metadata
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: vitrine.toml)
    #[arg(short = 'C', long, default_value = "vitrine.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a commented config template
    #[command(visible_alias = "i")]
    Init {
        /// Project directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,
    },

    /// Write sitemap.xml, robots.txt and the analytics script
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Serve metadata and image endpoints over HTTP
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Build Cloudinary delivery URLs
    #[command(visible_alias = "img")]
    Image {
        #[command(subcommand)]
        command: ImageCommand,
    },

    /// Query the Shopify storefront and admin APIs
    Shop {
        #[command(subcommand)]
        command: ShopCommand,
    },
}

/// Shared arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Minify the sitemap
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Enable sitemap generation
    #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override site URL for deployment.
    ///
    /// Useful for CI/CD deployments where the production URL differs from
    /// local development, without touching vitrine.toml.
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,
}

/// `vitrine image ...`
#[derive(Subcommand, Debug, Clone)]
pub enum ImageCommand {
    /// Delivery URL for a public id
    Url {
        /// Public id, e.g. "shoes/red"
        id: String,

        #[command(flatten)]
        transform: TransformArgs,

        /// Fail if the public id contains characters outside [A-Za-z0-9_-/.]
        #[arg(long)]
        check: bool,
    },

    /// Responsive srcset for a public id
    Srcset {
        id: String,

        /// Named preset used as the base options
        #[arg(long)]
        preset: Option<String>,

        /// Add DPR variants for every breakpoint
        #[arg(long)]
        dpr: bool,
    },

    /// Tiny blurred placeholder URL
    Placeholder { id: String },

    /// Gray fallback image URL
    Fallback {
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },

    /// List built-in and configured presets
    Presets,
}

/// Transformation flags for `image url`, applied on top of `--preset`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TransformArgs {
    /// Named preset used as the base options
    #[arg(long)]
    pub preset: Option<String>,

    #[arg(short = 'w', long)]
    pub width: Option<u32>,

    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Crop mode (fill, fit, scale, thumb, pad, ...)
    #[arg(long)]
    pub crop: Option<Crop>,

    /// Gravity (auto, face, center, north_east, ...)
    #[arg(long)]
    pub gravity: Option<Gravity>,

    /// Quality (auto, auto:good, auto:eco, 1-100, ...)
    #[arg(short, long)]
    pub quality: Option<Quality>,

    /// Format (auto, webp, avif, jpg, png, gif)
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Device pixel ratio (auto or a decimal)
    #[arg(long)]
    pub dpr: Option<Dpr>,

    /// Raw transformation appended verbatim after every other token
    #[arg(long)]
    pub raw: Option<String>,
}

/// `vitrine shop ...`
#[derive(Subcommand, Debug, Clone)]
pub enum ShopCommand {
    /// Product by handle
    Product { handle: String },

    /// First N products
    Products {
        #[arg(long, default_value_t = crate::commerce::DEFAULT_PRODUCT_COUNT)]
        first: u32,
    },

    /// Create a cart from `<variant>[:<qty>]` lines
    CartCreate {
        #[arg(required = true)]
        lines: Vec<CartLineInput>,
    },

    /// Add `<variant>[:<qty>]` lines to an existing cart
    CartAdd {
        cart_id: String,
        #[arg(required = true)]
        lines: Vec<CartLineInput>,
    },

    /// Recent orders (admin)
    Orders {
        #[arg(long, default_value_t = crate::commerce::DEFAULT_LIMIT)]
        limit: u32,
    },

    /// Customers (admin)
    Customers {
        #[arg(long, default_value_t = crate::commerce::DEFAULT_LIMIT)]
        limit: u32,
    },

    /// Fulfill an order (admin)
    Fulfill {
        order_id: u64,
        #[arg(long)]
        tracking_number: Option<String>,
        #[arg(long)]
        tracking_company: Option<String>,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}
