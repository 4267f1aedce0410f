use colored::Colorize;
use reserved_cidr_check::catalog::read_catalog;
use reserved_cidr_check::check_request;
use reserved_cidr_check::config;
use reserved_cidr_check::output::print_report;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    if let Err(e) = log4rs::init_file(config::LOG_CONFIG_FILE, Default::default()) {
        eprintln!("{} logging disabled: {e}", "WARN".on_red());
    }
    log::info!("#Start main()");

    let mut args = std::env::args().skip(1);
    let Some(cidr) = args.next() else {
        eprintln!("usage: reserved-cidr-check <a.b.c.d/n> [data-center ...]");
        return Err("missing requested CIDR".into());
    };
    let selected: Vec<String> = args.collect();
    let selected: Vec<&str> = selected.iter().map(String::as_str).collect();

    let catalog = read_catalog(&config::catalog_file())?;
    let evaluation = check_request(&catalog.regions, &cidr, &selected)?;
    print_report(&catalog.info, &evaluation);

    Ok(())
}
