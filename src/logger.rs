use std::{
    fmt::Display,
    sync::atomic::{AtomicBool, Ordering::SeqCst},
    time::Duration,
};

use crate::{Filter, Shape};

static PLAIN: AtomicBool = AtomicBool::new(false);

/// Wraps `x` in the ansi colour code `y`, unless plain output was requested.
pub fn ansi<T: Display, U: Display>(x: T, y: U) -> String {
    if PLAIN.load(SeqCst) {
        format!("{x}")
    } else {
        format!("\x1b[{y}m{x}\x1b[0m")
    }
}

pub fn set_plain(val: bool) {
    PLAIN.store(val, SeqCst)
}

pub fn banner(title: &str) {
    println!("{}", ansi("******************************************", 34));
    println!("{}", ansi(title, "34;1"));
    println!("{}", ansi("******************************************", 34));
}

pub fn report_image(path: impl Display, shape: Shape) {
    println!("Image                  : {}", ansi(path, "32;1"));
    println!("Width                  : {}", ansi(shape.cols(), 31));
    println!("Height                 : {}", ansi(shape.rows(), 31));
}

pub fn report_filter(idx: usize, filter: &Filter) {
    println!("filter {}:", ansi(idx, 36));
    print!("{}", filter.matrix());
}

pub fn report_finished(filters: usize, elapsed: Duration) {
    println!(
        "Convolved {} filters in {}s",
        ansi(filters, 36),
        ansi(format!("{:.6}", elapsed.as_secs_f64()), 36),
    );
}
