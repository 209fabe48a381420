//! Colored text output for one-shot runs.

use owo_colors::OwoColorize;

pub struct TextPrinter {
    pub color: Option<&'static str>,
}

impl TextPrinter {
    pub fn print(&self, text: &str) {
        if let Some(c) = self.color {
            match c {
                "green" => println!("{}", text.green()),
                "red" => println!("{}", text.red()),
                "cyan" => println!("{}", text.cyan()),
                "yellow" => println!("{}", text.yellow()),
                _ => println!("{}", text),
            }
        } else {
            println!("{}", text);
        }
    }

    pub fn eprint(&self, text: &str) {
        if let Some("red") = self.color {
            eprintln!("{}", text.red());
        } else {
            eprintln!("{}", text);
        }
    }
}
