//! Utilities for terminal output during scanning.

/// Terminal User Interface Module for CyberEye
/// Defines macros to use
#[macro_export]
macro_rules! warning {
    ($name:expr) => {
        println!("{} {}", colored::Colorize::bold(colored::Colorize::red("[!]")), $name);
    };
    ($name:expr, $greppable:expr, $accessible:expr) => {
        // if not greppable then print, otherwise no else statement so do not print.
        if !$greppable {
            if $accessible {
                // Don't print the ascii art
                println!("{}", $name);
            } else {
                println!("{} {}", colored::Colorize::bold(colored::Colorize::red("[!]")), $name);
            }
        }
    };
}

/// Prints a detail line (`[~]`) unless greppable.
#[macro_export]
macro_rules! detail {
    ($name:expr) => {
        println!("{} {}", colored::Colorize::bold(colored::Colorize::blue("[~]")), $name);
    };
    ($name:expr, $greppable:expr, $accessible:expr) => {
        if !$greppable {
            if $accessible {
                println!("{}", $name);
            } else {
                println!("{} {}", colored::Colorize::bold(colored::Colorize::blue("[~]")), $name);
            }
        }
    };
}

/// Prints a result line (`[>]`) unless greppable.
#[macro_export]
macro_rules! output {
    ($name:expr) => {
        println!(
            "{} {}",
            colored::Colorize::bold(colored::Colorize::truecolor("[>]", 0, 255, 9)),
            $name
        );
    };
    ($name:expr, $greppable:expr, $accessible:expr) => {
        if !$greppable {
            if $accessible {
                println!("{}", $name);
            } else {
                println!(
                    "{} {}",
                    colored::Colorize::bold(colored::Colorize::truecolor("[>]", 0, 255, 9)),
                    $name
                );
            }
        }
    };
}

/// Prints a random opening line.
#[macro_export]
macro_rules! funny_opening {
    // prints a funny quote / opening
    () => {
        use rand::seq::IndexedRandom;
        let quotes = [
            "Every username leaves footprints.",
            "Same handle, seventeen places. Let's see which ones.",
            "Public pages only. Nothing was hacked in the making of this report.",
            "Soft 404s are still 404s. Mostly.",
            "Reconnaissance is just curiosity with a timeout.",
        ];
        if let Some(quote) = quotes.choose(&mut rand::rng()) {
            println!("{}\n", quote);
        }
    };
}
