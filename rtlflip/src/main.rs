use clap::{Parser, ValueEnum};
use log::info;
use rtlflip_lib::rtl_generate::rtl_css;
use rtlflip_lib::{config, Flip, Opt, RtlOptions, SheetOptions};
use std::fs;
use std::path::PathBuf;

const RTLFLIP_INTRO: &str = r#"
       _   _  __ _ _
  _ __| |_| |/ _| (_)_ __
 | '__| __| | |_| | | '_ \
 | |  | |_| |  _| | | |_) |
 |_|   \__|_|_| |_|_| .__/
                    |_|
    Mirror JSS-style sheets for right-to-left layouts.
"#;

#[derive(Clone, Copy, ValueEnum)]
enum OptArg {
    In,
    Out,
}

impl From<OptArg> for Opt {
    fn from(opt: OptArg) -> Self {
        match opt {
            OptArg::In => Opt::In,
            OptArg::Out => Opt::Out,
        }
    }
}

#[derive(Parser)]
#[command(name = "rtlflip")]
#[command(about = "Mirror a JSON style object for right-to-left layouts and print CSS")]
struct Args {
    /// Input JSON style object.
    input: PathBuf,

    /// Output CSS file. Prints to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Plugin options file (TOML). Defaults to ./rtlflip.toml if present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Turn the plugin off; `flip` markers are still stripped.
    #[arg(long)]
    disabled: bool,

    /// Default policy when no rule or sheet setting applies.
    #[arg(long, value_enum)]
    opt: Option<OptArg>,

    /// Sheet-wide flip setting.
    #[arg(long)]
    sheet_flip: Option<bool>,

    /// Minify the generated CSS.
    #[arg(long)]
    minify: bool,

    /// Skip the banner.
    #[arg(short, long)]
    quiet: bool,
}

fn plugin_options(args: &Args) -> rtlflip_lib::Result<RtlOptions> {
    let mut options = match &args.config {
        Some(path) => config::load_from_file(path)?,
        None => config::load_or_default()?,
    };
    if args.disabled {
        options.enabled = false;
    }
    if let Some(opt) = args.opt {
        options.opt = opt.into();
    }
    Ok(options)
}

fn run(args: &Args) -> rtlflip_lib::Result<()> {
    let options = plugin_options(args)?;
    let sheet = SheetOptions::new(Flip::from(args.sheet_flip));
    info!("plugin options: {:?}, sheet: {:?}", options, sheet);

    let style_json = fs::read_to_string(&args.input).map_err(|source| rtlflip_lib::Error::Io {
        path: args.input.display().to_string(),
        source,
    })?;

    let css = if args.minify {
        rtl_css::generate_minified(&style_json, options, sheet)?
    } else {
        rtl_css::generate(&style_json, options, sheet)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, css + "\n").map_err(|source| rtlflip_lib::Error::Io {
                path: path.display().to_string(),
                source,
            })?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", css),
    }
    Ok(())
}

fn main() {
    env_logger::init();

    // parse the args given in terminal
    let args: Args = Args::parse();

    if !args.quiet && args.output.is_some() {
        println!("{}", RTLFLIP_INTRO);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
