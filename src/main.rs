use clap::{Arg, Command};
use lost_in_translation::{Replacements, TranslationConfig, Translator};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("lost-in-translation")
        .version("0.1.0")
        .about("Resolve translation keys against brand and default catalogs")
        .arg(
            Arg::new("key")
                .help("Translation key to resolve, e.g. greeting.hello")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .short('c')
                .help("Default catalog root directory (default: lang)")
                .default_value("lang"),
        )
        .arg(
            Arg::new("brand")
                .long("brand")
                .short('b')
                .help("Brand override catalog root directory"),
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .short('l')
                .help("Locale to resolve in (default: en)")
                .default_value("en"),
        )
        .arg(
            Arg::new("fallback")
                .long("fallback")
                .short('f')
                .help("Fallback locale consulted on a miss"),
        )
        .arg(
            Arg::new("replace")
                .long("replace")
                .short('r')
                .help("Placeholder value as name=value (repeatable)")
                .action(clap::ArgAction::Append),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail when the key cannot be resolved")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let key = matches.get_one::<String>("key").unwrap();
    let catalog_root = matches.get_one::<String>("catalog").unwrap();
    let locale = matches.get_one::<String>("locale").unwrap();

    let mut config = TranslationConfig::from_env();
    if let Some(brand) = matches.get_one::<String>("brand") {
        config.translation_brand_path = Some(PathBuf::from(brand));
    }
    if matches.get_flag("strict") {
        config.throw_exceptions = true;
    }

    let mut translator = Translator::from_path(catalog_root, locale.clone(), config);
    if let Some(fallback) = matches.get_one::<String>("fallback") {
        translator = translator.with_fallback(fallback.clone());
    }

    let mut replacements = Replacements::new();
    if let Some(pairs) = matches.get_many::<String>("replace") {
        for pair in pairs {
            match pair.split_once('=') {
                Some((name, value)) => replacements.insert(name, value),
                None => eprintln!("Ignoring malformed replacement '{}': expected name=value", pair),
            }
        }
    }

    let resolved = translator.resolve(key, &replacements, None, true)?;
    println!("{}", resolved);
    Ok(())
}
