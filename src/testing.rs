//! Test doubles for the data line and the counter.
//!
//! [`SimLine`] plays back a recorded sensor waveform against a virtual
//! clock that advances one microsecond every time it is read, so pulse
//! widths and timeouts come out deterministic without real delays.

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::clock::Clock;
use crate::pin::IoPin;

/// What the MCU did to the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Output,
    Input,
    Drive(bool),
}

/// Builds the waveform a healthy sensor sends after the start signal:
/// the acknowledgment, then a 50us LOW and a 26us (0) or 70us (1) HIGH per
/// bit, then a final LOW before releasing the line.
pub fn sensor_response(bytes: &[u8]) -> Vec<(bool, u32)> {
    let mut segments = vec![(true, 20), (false, 80), (true, 80)];

    for byte in bytes {
        for i in 0..8 {
            let bit = (byte >> (7 - i)) & 1;
            segments.push((false, 50));
            segments.push((true, if bit == 1 { 70 } else { 26 }));
        }
    }

    segments.push((false, 50));
    segments.push((true, 1));
    segments
}

/// Counter that ticks once per microsecond, advancing on every read.
#[derive(Debug, Default)]
pub struct StepClock {
    now: u32,
}

impl Clock for StepClock {
    const TICKS_PER_US: u32 = 1;

    fn ticks(&mut self) -> u32 {
        self.now += 1;
        self.now
    }
}

/// 7-bit counter at 1 tick per microsecond, wrapping every 128us.
#[derive(Debug, Default)]
pub struct NarrowClock {
    now: u32,
}

impl Clock for NarrowClock {
    const TICKS_PER_US: u32 = 1;
    const COUNTER_MASK: u32 = 0x7F;

    fn ticks(&mut self) -> u32 {
        self.now = (self.now + 1) & Self::COUNTER_MASK;
        self.now
    }
}

#[derive(Debug)]
struct Line {
    now_us: u32,
    base_ticks: u32,
    response: Vec<(bool, u32)>,
    input_since: Option<u32>,
    driven: bool,
    events: Vec<Event>,
}

impl Line {
    fn level(&self) -> bool {
        let Some(since) = self.input_since else {
            return self.driven;
        };

        let mut offset = self.now_us.wrapping_sub(since);
        for &(level, duration) in &self.response {
            if offset < duration {
                return level;
            }
            offset -= duration;
        }
        // The last segment holds forever; an idle line floats high
        self.response.last().is_none_or(|&(level, _)| level)
    }
}

/// A data line shared between a [`SimPin`] and a [`SimClock`].
#[derive(Debug, Clone)]
pub struct SimLine(Rc<RefCell<Line>>);

impl SimLine {
    pub const TICKS_PER_US: u32 = 240;

    pub fn new(response: Vec<(bool, u32)>) -> Self {
        Self::starting_at(0, response)
    }

    /// Starts the counter at `base_ticks` instead of zero.
    pub fn starting_at(base_ticks: u32, response: Vec<(bool, u32)>) -> Self {
        SimLine(Rc::new(RefCell::new(Line {
            now_us: 0,
            base_ticks,
            response,
            input_since: None,
            driven: true,
            events: Vec::new(),
        })))
    }

    pub fn pin(&self) -> SimPin {
        SimPin(self.0.clone())
    }

    pub fn clock(&self) -> SimClock {
        SimClock(self.0.clone())
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }
}

#[derive(Debug)]
pub struct SimPin(Rc<RefCell<Line>>);

impl SimPin {
    /// Replaces the waveform played back on the next exchange.
    pub fn replay(&self, response: Vec<(bool, u32)>) {
        self.0.borrow_mut().response = response;
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.borrow().level())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.borrow().level())
    }
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut line = self.0.borrow_mut();
        line.driven = false;
        line.events.push(Event::Drive(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut line = self.0.borrow_mut();
        line.driven = true;
        line.events.push(Event::Drive(true));
        Ok(())
    }
}

impl IoPin for SimPin {
    fn set_input_mode(&mut self) -> Result<(), Self::Error> {
        let mut line = self.0.borrow_mut();
        line.input_since = Some(line.now_us);
        line.events.push(Event::Input);
        Ok(())
    }

    fn set_output_mode(&mut self) -> Result<(), Self::Error> {
        let mut line = self.0.borrow_mut();
        line.input_since = None;
        line.events.push(Event::Output);
        Ok(())
    }
}

#[derive(Debug)]
pub struct SimClock(Rc<RefCell<Line>>);

impl Clock for SimClock {
    const TICKS_PER_US: u32 = SimLine::TICKS_PER_US;

    fn ticks(&mut self) -> u32 {
        let mut line = self.0.borrow_mut();
        line.now_us = line.now_us.wrapping_add(1);
        line.base_ticks.wrapping_add(line.now_us.wrapping_mul(SimLine::TICKS_PER_US))
    }
}
