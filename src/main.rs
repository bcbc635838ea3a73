//! Mirror Layout CLI
//!
//! Usage:
//!   mirror-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -g, --grammar   Show constraint grammar reference
//!   -v, --verbose   Print conversion ratio and constraint count
//!   -h, --help      Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use mirror_layout::{build_engine, KindRegistry, Scene};

#[derive(Parser)]
#[command(name = "mirror-layout")]
#[command(about = "Constraint-driven placement engine for fixed canvases")]
struct Cli {
    /// Scene file in TOML format (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Show constraint grammar reference
    #[arg(short, long)]
    grammar: bool,

    /// Print conversion ratio and constraint count before placements
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.grammar {
        print_grammar();
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let source = match &cli.input {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let scene = match Scene::from_str(&source) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut engine = match build_engine(&scene, &KindRegistry::with_builtins()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = engine.evaluate_all() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if cli.verbose {
        println!(
            "{} ({} elements, {} constraints)",
            engine.conversion(),
            engine.element_count(),
            engine.constraint_count()
        );
    }
    print!("{}", engine.summary());
}

fn print_intro() {
    println!(
        r#"Mirror Layout - constraint-driven placement for fixed canvases

USAGE:
    mirror-layout [OPTIONS] [FILE]
    cat scene.toml | mirror-layout

OPTIONS:
    -g, --grammar   Show constraint grammar reference
    -v, --verbose   Print conversion ratio and constraint count
    -h, --help      Print help

QUICK START:
    A scene file declares the canvas twice (pixels and physical size)
    and lists elements with constraint lines:

        [canvas]
        pixel_size = ["1000px", "500px"]
        physical_size = ["10in", "5in"]

        [[element]]
        id = "clock"
        constraints = ["clock.left = 10px", "clock.width = 1in"]

Run --grammar for the constraint syntax reference."#
    );
}

fn print_grammar() {
    println!(
        r#"MIRROR LAYOUT CONSTRAINT GRAMMAR
================================

CONSTRAINTS (one per line)
--------------------------
constraint := target "=" expr
target     := identifier "." edge
expr       := term (("+"|"-") term)*
term       := [number "*"] ref | [number "*"] measurement | measurement
ref        := identifier "." edge
measurement:= number unit?          unit: px, cm, in (default px)
edge       := left | right | width | top | bottom | height
identifier := self | parent | <element-id>

EDGES
-----
Each element has six edges grouped into two axes:
    horizontal: left, right, width
    vertical:   top, bottom, height
At most two edges per axis may be constrained; the third is derived.
Unconstrained axes fall back to origin 0 and extent 100.

ALIASES
-------
self        The element the constraint targets
parent      The target element's declared parent

MEASUREMENTS
------------
Physical units convert through the canvas declaration:
a 1000px-wide canvas declared as 10in gives 100 px/in, so
"1in" means 100 pixels. Conversions truncate toward zero.

EXAMPLES
--------
clock.left = 10px
clock.width = 1in
calendar.left = clock.right + 5px
news.width = 2 * clock.width - 0.5in
badge.left = parent.left + 10px
badge.right = self.left + 50px"#
    );
}
