#![windows_subsystem = "windows"]

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--print-config") {
        let config = webtex::config::Config::default();
        match toml::to_string_pretty(&config) {
            Ok(s) => print!("{s}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("webtex {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("webtex {}", env!("CARGO_PKG_VERSION"));
        println!("Mirrors a remotely rendered bitmap source into a GPU texture\n");
        println!("USAGE:");
        println!("    webtex [OPTIONS]\n");
        println!("OPTIONS:");
        println!("    --print-config    Print the default configuration to stdout");
        println!("    --version, -V     Print version information");
        println!("    --help, -h        Print this help message");
        println!("\nKEYS:");
        println!("    r    Simulate a source navigation (full-refresh cycle)");
        println!("    c    Simulate the source going away (blank + refresh)");
        return;
    }

    if let Err(e) = webtex::app::App::run() {
        let _ = std::fs::write("webtex_error.log", format!("{e:?}"));
    }
}
