//! End-to-end keyboard pipeline: simulated GPIO lines in, characters out.

use std::thread;
use std::time::Duration;

use ps2_input::devices::drivers::ps2::{encode_frame, SimulatedKeyboard};
use ps2_input::keymap::special;
use ps2_input::{
    init_keyboard, KeyAction, Keyboard, Modifiers, Pin, Ps2Config, Ps2Error, SimulatedGpio,
};

const CLK: Pin = Pin(3);
const DAT: Pin = Pin(4);

fn keyboard(gpio: &SimulatedGpio) -> Keyboard {
    Keyboard::new(gpio, Ps2Config::new(CLK, DAT)).unwrap()
}

#[test]
fn typing_a_word_with_shift() {
    let gpio = SimulatedGpio::new();
    let mut kb = init_keyboard(&gpio, Ps2Config::default()).unwrap();

    // "Ok!" : shift+o, k, shift+1
    gpio.send_bytes(
        CLK,
        DAT,
        &[
            0x12, 0x44, 0xF0, 0x44, 0xF0, 0x12, // O
            0x42, 0xF0, 0x42, // k
            0x59, 0x16, 0xF0, 0x16, 0xF0, 0x59, // !
        ],
    );

    let typed: Vec<u8> = (0..3).map(|_| kb.read_next()).collect();
    assert_eq!(typed, b"Ok!");
    assert_eq!(kb.try_read_next(), None);
    assert!(kb.modifiers().is_empty());
}

#[test]
fn corrupted_frame_is_dropped_and_stream_recovers() {
    let gpio = SimulatedGpio::new();
    let mut kb = keyboard(&gpio);

    let mut bad = encode_frame(0x1C);
    bad[9] ^= 1;
    gpio.clock_bits(CLK, DAT, &bad);
    // a stray high sample while idle is ignored
    gpio.clock_bit(CLK, DAT, 1);
    gpio.send_byte(CLK, DAT, 0x32);

    assert_eq!(kb.read_next(), b'b');
    let stats = kb.stats();
    assert_eq!(stats.parity_errors, 1);
    assert_eq!(stats.frames, 1);
    assert_eq!(stats.edges, 23);
}

#[test]
fn caps_lock_spans_many_keys() {
    let gpio = SimulatedGpio::new();
    let mut kb = keyboard(&gpio);

    gpio.send_bytes(CLK, DAT, &[0x58, 0xF0, 0x58, 0x21, 0x1C, 0x26]);
    assert_eq!(kb.read_next(), b'C');
    assert_eq!(kb.read_next(), b'A');
    assert_eq!(kb.read_next(), b'3');
    assert_eq!(kb.modifiers(), Modifiers::CAPS_LOCK);
}

#[test]
fn extended_keys_reach_every_layer() {
    let gpio = SimulatedGpio::new();
    let mut kb = keyboard(&gpio);

    gpio.send_bytes(CLK, DAT, &[0xE0, 0x72, 0xE0, 0xF0, 0x72, 0xE0, 0x71]);
    assert_eq!(kb.read_sequence(), KeyAction::press(0x72).extended());

    let ev = kb.read_event();
    assert!(ev.is_release());
    assert!(ev.action.extended);

    assert_eq!(kb.read_next(), special::DELETE);
}

#[test]
fn overflow_keeps_oldest_bytes() {
    let gpio = SimulatedGpio::new();
    let mut kb = Keyboard::new(&gpio, Ps2Config::new(CLK, DAT).with_queue_capacity(4)).unwrap();

    gpio.send_bytes(CLK, DAT, &[0x1C, 0x32, 0x21, 0x23, 0x24, 0x2B]);
    assert_eq!(kb.stats().queue_overflows, 2);

    let typed: Vec<u8> = std::iter::from_fn(|| kb.try_read_next()).collect();
    assert_eq!(typed, b"abcd");
}

#[test]
fn blocking_reader_wakes_on_keystrokes() {
    let gpio = SimulatedGpio::new();
    let mut kb = keyboard(&gpio);

    thread::scope(|s| {
        let reader = s.spawn(move || (kb.read_next(), kb.read_next()));

        thread::sleep(Duration::from_millis(20));
        gpio.send_bytes(CLK, DAT, &[0x12, 0x2C, 0xF0, 0x2C, 0xF0, 0x12]);
        thread::sleep(Duration::from_millis(20));
        gpio.send_bytes(CLK, DAT, &[0x5A]);

        assert_eq!(reader.join().unwrap(), (b'T', b'\n'));
    });
}

#[test]
fn two_keyboards_on_one_controller() {
    let gpio = SimulatedGpio::new();
    let mut left = keyboard(&gpio);
    let mut right = Keyboard::new(&gpio, Ps2Config::new(Pin(23), Pin(24))).unwrap();

    gpio.send_byte(CLK, DAT, 0x12);
    gpio.send_bytes(Pin(23), Pin(24), &[0x1C]);
    gpio.send_byte(CLK, DAT, 0x1C);

    assert_eq!(right.read_next(), b'a');
    assert_eq!(left.read_next(), b'A');
}

#[test]
fn clock_pin_can_only_be_claimed_once() {
    let gpio = SimulatedGpio::new();
    let _kb = keyboard(&gpio);
    let second = Keyboard::new(&gpio, Ps2Config::new(CLK, Pin(5)));
    assert_eq!(second.err(), Some(Ps2Error::HandlerAlreadyRegistered(CLK)));
}
