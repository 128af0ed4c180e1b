use clap::Parser;
use std::path::PathBuf;

use mmap::{msg::Msg, Config, Error, Paths, Report, Tools};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Project root directory
    #[clap(short, long, default_value = ".")]
    project_root: PathBuf,

    /// Output file, relative to the project root
    #[clap(short, long, default_value = "mmap.txt")]
    output: PathBuf,

    /// Input locations and tool names (YAML)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Also write the extracted facts as YAML
    #[clap(long)]
    facts: Option<PathBuf>,

    /// Seconds before nm/objdump are killed (0 waits forever)
    #[clap(short, long)]
    timeout: Option<u64>,

    /// Print the memory map
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        Msg::from(&err).print();
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    println!("Kernel Memory Map Generator");

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(secs) = args.timeout {
        config.tool_timeout = (secs > 0).then_some(secs);
    }
    let paths = Paths::resolve(&args.project_root, &config);

    println!("1. Extract Symbols, Sections and Source Constants");
    for input in [&paths.binary, &paths.boot_source, &paths.boot_header, &paths.drivers] {
        println!("  < {}", input.display());
    }
    let collected = mmap::collect(&config, &paths, &Tools::new(&config));
    collected.report();
    let facts = collected.into_facts();

    println!("2. Assemble Memory Map");
    let report = Report::assemble(&config, &facts);
    let output = paths.root.join(&args.output);
    println!("  > {}", output.display());
    report.write(&output)?;

    if let Some(path) = &args.facts {
        let path = paths.root.join(path);
        println!("  > {}", path.display());
        facts.write_yaml(&path)?;
    }

    if args.dump {
        report.cprint();
    }

    println!("Generated memory map at: {}", output.display());
    println!(
        "Extracted {} symbols and {} sections",
        facts.symbols.len(),
        facts.sections.len()
    );
    Ok(())
}
