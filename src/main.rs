use chord_diagram::cli::{self, Options};
use chord_diagram::{parse_chords, DiagramDocument, DiagramError, InstrumentTable, Renderer};
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    // Nothing works without LilyPond, so check before anything else.
    let renderer = match Renderer::locate() {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let table = match InstrumentTable::builtin() {
        Ok(table) => table,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let options = match cli::parse_args(&table, env::args_os()) {
        Ok(options) => options,
        Err(e) => process::exit(cli::report_parse_error(&e)),
    };

    if let Err(e) = run(&table, &renderer, &options) {
        eprintln!("{}", e);
        if let DiagramError::UnknownInstrument(_) = e {
            eprintln!();
            eprintln!("{}", cli::command(&table).render_usage());
            eprintln!("{}", cli::usage_notes(&table));
        }
        process::exit(1);
    }
}

fn run(table: &InstrumentTable, renderer: &Renderer, options: &Options) -> Result<(), DiagramError> {
    let instrument = table.resolve(&options.instrument)?;
    let chords = parse_chords(&options.chords)?;
    let source = DiagramDocument::new(instrument, &chords, options.size).to_lilypond();

    // Generate LilyPond code instead of a chord diagram.
    if options.lilypond {
        match &options.output {
            Some(path) => fs::write(path, &source).map_err(|e| DiagramError::io(path, e))?,
            None => print!("{}", source),
        }
        return Ok(());
    }

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| cli::default_output_name(instrument, &chords));
    renderer.render_png(&source, &output)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
