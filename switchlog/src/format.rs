// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;
use clocksource::datetime::DateTime;
use clocksource::precise::UnixInstant;
use core::fmt::Arguments;

pub type FormatFunction = fn(
    write: &mut dyn std::io::Write,
    now: UnixInstant,
    record: &Record,
) -> Result<(), std::io::Error>;

/// A single message on its way to a backend.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    level: LogLevel,
    tag: &'a str,
    args: Arguments<'a>,
}

impl<'a> Record<'a> {
    pub fn new(level: LogLevel, tag: &'a str, args: Arguments<'a>) -> Self {
        Self { level, tag, args }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn tag(&self) -> &'a str {
        self.tag
    }

    pub fn args(&self) -> &Arguments<'a> {
        &self.args
    }
}

/// `<timestamp> <tag>[<pid>] <LEVEL> <message>`
pub fn default_format(
    w: &mut dyn std::io::Write,
    now: UnixInstant,
    record: &Record,
) -> Result<(), std::io::Error> {
    writeln!(
        w,
        "{} {}[{}] {} {}",
        DateTime::from(now),
        record.tag(),
        std::process::id(),
        record.level().label(),
        record.args()
    )
}

/// `<LEVEL> <message>`, for destinations that stamp messages on their own.
pub fn message_format(
    w: &mut dyn std::io::Write,
    _now: UnixInstant,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(w, "{} {}", record.level().label(), record.args())
}
