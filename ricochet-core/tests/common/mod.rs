//! Recording mocks shared by the integration tests
//!
//! Every collaborator writes into one [`World`] so tests can assert on
//! the interleaving of display, tone, LED and radio calls.

#![allow(dead_code)]

use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal_async::delay::DelayNs;
use ricochet_core::config::AddressFilter;
use ricochet_core::traits::{
    Clock, Color, DecodeError, DecodedMessage, DisplayError, DisplaySurface, PagerRadio,
    RadioDecoder, RadioError, Rect, ToneEmitter,
};
use ricochet_core::{AlertOutputs, BootPhase, Pager, PagerConfig};
use ricochet_hal::{AdcError, AnalogInput, OutputPin};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Batches,
    Decode,
    BeginFsk,
    BeginPager(u32, u16),
    StartReceive(AddressFilter),
    DisplayInit,
    Clear,
    Fill(Rect, Color),
    Cursor(i16, i16),
    TextColor(Color),
    Print(String),
    Flush,
    Tone(u16, u32),
    LedOn,
    LedOff,
    DelayMs(u32),
    Adc,
}

#[derive(Debug)]
pub struct WorldState {
    pub calls: Vec<Call>,
    pub batches: usize,
    pub pages: VecDeque<Result<DecodedMessage, DecodeError>>,
    pub now_ms: u64,
    pub adc: Result<u16, AdcError>,
    pub fail_phase: Option<BootPhase>,
    pub fail_flush: bool,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            batches: 0,
            pages: VecDeque::new(),
            now_ms: 0,
            adc: Ok(2047),
            fail_phase: None,
            fail_flush: false,
        }
    }
}

#[derive(Clone, Default)]
pub struct World(pub Rc<RefCell<WorldState>>);

impl World {
    pub fn get(&self) -> Ref<'_, WorldState> {
        self.0.borrow()
    }

    pub fn get_mut(&self) -> RefMut<'_, WorldState> {
        self.0.borrow_mut()
    }

    pub fn record(&self, call: Call) {
        self.0.borrow_mut().calls.push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }

    /// Queue a page; the decoder reports `batches` until it is read
    pub fn queue_page(&self, address: u32, text: &str, batches: usize) {
        let mut state = self.0.borrow_mut();
        state.pages.push_back(Ok(DecodedMessage::new(address, text)));
        state.batches = batches;
    }

    pub fn queue_failure(&self, code: i16, batches: usize) {
        let mut state = self.0.borrow_mut();
        state.pages.push_back(Err(DecodeError(code)));
        state.batches = batches;
    }

    pub fn set_batches(&self, batches: usize) {
        self.0.borrow_mut().batches = batches;
    }

    pub fn set_now(&self, now_ms: u64) {
        self.0.borrow_mut().now_ms = now_ms;
    }

    pub fn set_adc(&self, adc: Result<u16, AdcError>) {
        self.0.borrow_mut().adc = adc;
    }

    pub fn fail_phase(&self, phase: BootPhase) {
        self.0.borrow_mut().fail_phase = Some(phase);
    }

    pub fn fail_flush(&self, fail: bool) {
        self.0.borrow_mut().fail_flush = fail;
    }

    fn fails(&self, phase: BootPhase) -> bool {
        self.0.borrow().fail_phase == Some(phase)
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn tones(&self) -> Vec<u16> {
        self.0
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Tone(f, _) => Some(*f),
                _ => None,
            })
            .collect()
    }

    pub fn printed(&self) -> Vec<String> {
        self.0
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Print(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }
}

pub struct MockRadio(pub World);

impl RadioDecoder for MockRadio {
    async fn available_batches(&mut self) -> usize {
        self.0.record(Call::Batches);
        self.0.get().batches
    }

    async fn decode(&mut self) -> Result<DecodedMessage, DecodeError> {
        self.0.record(Call::Decode);
        let mut state = self.0.get_mut();
        state.batches = 0;
        let page = state.pages.pop_front().unwrap_or(Err(DecodeError(-1)));
        page
    }
}

impl PagerRadio for MockRadio {
    async fn begin_fsk(&mut self) -> Result<(), RadioError> {
        self.0.record(Call::BeginFsk);
        if self.0.fails(BootPhase::Radio) {
            return Err(RadioError(-2));
        }
        Ok(())
    }

    async fn begin_pager(&mut self, frequency_hz: u32, baud: u16) -> Result<(), RadioError> {
        self.0.record(Call::BeginPager(frequency_hz, baud));
        if self.0.fails(BootPhase::Protocol) {
            return Err(RadioError(-13));
        }
        Ok(())
    }

    async fn start_receive(&mut self, filter: AddressFilter) -> Result<(), RadioError> {
        self.0.record(Call::StartReceive(filter));
        if self.0.fails(BootPhase::Receiver) {
            return Err(RadioError(-20));
        }
        Ok(())
    }
}

pub struct MockDisplay(pub World);

impl DisplaySurface for MockDisplay {
    async fn init(&mut self) -> Result<(), DisplayError> {
        self.0.record(Call::DisplayInit);
        if self.0.fails(BootPhase::Display) {
            return Err(DisplayError::NotFound);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.0.record(Call::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.0.record(Call::Fill(rect, color));
    }

    fn set_cursor(&mut self, x: i16, y: i16) {
        self.0.record(Call::Cursor(x, y));
    }

    fn set_text_color(&mut self, color: Color) {
        self.0.record(Call::TextColor(color));
    }

    fn print(&mut self, text: &str) {
        self.0.record(Call::Print(text.into()));
    }

    async fn flush(&mut self) -> Result<(), DisplayError> {
        self.0.record(Call::Flush);
        if self.0.get().fail_flush {
            return Err(DisplayError::Bus);
        }
        Ok(())
    }
}

pub struct MockTone(pub World);

impl ToneEmitter for MockTone {
    async fn emit(&mut self, frequency_hz: u16, duration_ms: u32) {
        self.0.record(Call::Tone(frequency_hz, duration_ms));
    }
}

pub struct MockLed(pub World);

impl OutputPin for MockLed {
    fn set_high(&mut self) {
        self.0.record(Call::LedOn);
    }

    fn set_low(&mut self) {
        self.0.record(Call::LedOff);
    }

    fn is_set_high(&self) -> bool {
        self.0
            .get()
            .calls
            .iter()
            .rev()
            .find_map(|c| match c {
                Call::LedOn => Some(true),
                Call::LedOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

pub struct MockDelay(pub World);

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.record(Call::DelayMs(ns / 1_000_000));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.record(Call::DelayMs(ms));
    }
}

pub struct MockAdc(pub World);

impl AnalogInput for MockAdc {
    const FULL_SCALE: u16 = 4095;

    fn read_raw(&mut self) -> Result<u16, AdcError> {
        self.0.record(Call::Adc);
        self.0.get().adc
    }
}

pub struct MockClock(pub World);

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.0.get().now_ms
    }
}

pub type TestPager =
    Pager<MockRadio, MockDisplay, MockTone, MockLed, MockDelay, MockAdc, MockClock>;

pub fn pager(world: &World, config: PagerConfig) -> TestPager {
    Pager::new(
        config,
        MockRadio(world.clone()),
        AlertOutputs {
            display: MockDisplay(world.clone()),
            tone: MockTone(world.clone()),
            indicator: MockLed(world.clone()),
            delay: MockDelay(world.clone()),
        },
        MockAdc(world.clone()),
        MockClock(world.clone()),
    )
}

/// Boot with the given config and forget the boot-time calls
pub fn booted(world: &World, config: PagerConfig) -> TestPager {
    let mut pager = pager(world, config);
    embassy_futures::block_on(pager.boot()).expect("boot");
    world.clear_calls();
    pager
}
