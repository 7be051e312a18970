use promdump::{
    bus::{Bus, Drive, Level, Line, Mode, Port, Pull},
    dump::{Dumper, PHASES, Phase},
    lines,
    relay::{Serial, wait_start},
    sim::{Board, Terminal},
    wiring::{Control, Controls, Pinout},
    };


// a small device so a full dump stays cheap: 32 addresses, 2 output rows
const PINOUT: Pinout<5, 8> = Pinout::new(
    Bus::new(lines![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]),
    Bus::new(lines![(1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (1, 5), (1, 6), (1, 7)]),
    Controls {
        output_enable: Control::active_low(Line::new(2, 0)),
        chip_enable: Control::active_low(Line::new(2, 1)),
        write_enable: Control::active_low(Line::new(2, 2)),
    },
);

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// dumper brought up on a board holding the given chip contents
fn bench(contents: &[u8]) -> (Dumper<5, 8>, Board<'_, 5, 8>) {
    let dumper = Dumper::new(PINOUT);
    let mut board = Board::new(PINOUT, contents);
    dumper.bring_up(&mut board);
    (dumper, board)
}


#[test]
fn address_and_phase_derive_from_the_counter() {
    init();
    let contents = [0u8; 32];
    let (mut dumper, mut board) = bench(&contents);
    let mut relay = Serial::new(Terminal::new());
    for n in 0 .. 32 * PHASES {
        assert_eq!(dumper.counter(), n);
        assert_eq!(dumper.address(), n / PHASES);
        assert_eq!(dumper.phase(), match n % PHASES {
            0 => Phase::Address,
            1 => Phase::High,
            2 => Phase::Low,
            _ => Phase::Separator,
        });
        dumper.tick(&mut board, &mut relay);
    }
    assert!(dumper.done());
}

#[test]
fn dump_text_for_uniform_contents() {
    init();
    let contents = [0xa5; 32];
    let (mut dumper, mut board) = bench(&contents);
    let mut relay = Serial::new(Terminal::new());
    while !dumper.done() {
        dumper.tick(&mut board, &mut relay);
    }
    let terminal = relay.release();
    let row = "\na5 a5 a5 a5 a5 a5 a5 a5 a5 a5 a5 a5 a5 a5 a5 a5\r";
    assert_eq!(str::from_utf8(&terminal.sent).unwrap(), [row, row].concat());
}

#[test]
fn dump_text_matches_the_contents() {
    init();
    let mut contents = [0u8; 32];
    for (i, cell) in contents.iter_mut().enumerate() {
        *cell = (i as u8).wrapping_mul(0x1f).wrapping_add(0x3);
    }
    let (mut dumper, mut board) = bench(&contents);
    let mut relay = Serial::new(Terminal::new());
    while !dumper.done() {
        dumper.tick(&mut board, &mut relay);
    }
    let terminal = relay.release();
    let mut expected = String::new();
    for (address, cell) in contents.into_iter().enumerate() {
        if address % 16 == 0 {
            expected.push('\n');
        }
        expected += &format!("{:02x}", cell);
        expected.push(if address % 16 == 15 {'\r'} else {' '});
    }
    assert_eq!(str::from_utf8(&terminal.sent).unwrap(), expected);
}

#[test]
fn terminal_state_is_permanent() {
    init();
    let contents = [0xa5; 32];
    let (mut dumper, mut board) = bench(&contents);
    let mut relay = Serial::new(Terminal::new());
    for _ in 0 .. 32 * PHASES {
        dumper.tick(&mut board, &mut relay);
    }
    assert!(dumper.done());

    // well past the end, ticks must not touch the port nor the link anymore
    let terminal = relay.release();
    let before = (dumper.counter(), board.sets, board.gets, terminal.sent.len());
    let mut relay = Serial::new(terminal);
    for _ in 0 .. 100 {
        dumper.tick(&mut board, &mut relay);
    }
    let terminal = relay.release();
    assert_eq!((dumper.counter(), board.sets, board.gets, terminal.sent.len()), before);
    assert!(dumper.done());
}

#[test]
fn refused_byte_repeats_the_tick() {
    init();
    let contents = [0x5a; 32];
    let (mut dumper, mut board) = bench(&contents);
    let mut terminal = Terminal::new();

    // run to the low digit phase of address 0
    let mut relay = Serial::new(&mut terminal);
    dumper.tick(&mut board, &mut relay);
    dumper.tick(&mut board, &mut relay);
    drop(relay);
    assert_eq!(dumper.phase(), Phase::Low);
    assert_eq!(&terminal.sent[..], b"\n5");

    // 5 refusals then one acceptance: one byte out, one single step forward
    terminal.hold(5);
    let (counter, sent, gets) = (dumper.counter(), terminal.sent.len(), board.gets);
    let mut relay = Serial::new(&mut terminal);
    for _ in 0 .. 6 {
        dumper.tick(&mut board, &mut relay);
    }
    drop(relay);
    assert_eq!(dumper.counter(), counter + 1);
    assert_eq!(terminal.sent.len(), sent + 1);
    assert_eq!(terminal.sent[sent], b'a');
    assert_eq!(board.gets, gets);
}

#[test]
fn row_start_waits_for_the_relay() {
    init();
    let contents = [0xa5; 32];
    let (mut dumper, mut board) = bench(&contents);
    let mut terminal = Terminal::new();
    terminal.hold(1);

    // the address goes out but the row cannot open: no advance, nothing sent,
    // the device not yet driving
    let mut relay = Serial::new(&mut terminal);
    dumper.tick(&mut board, &mut relay);
    drop(relay);
    assert_eq!(dumper.counter(), 0);
    assert!(terminal.sent.is_empty());
    assert_eq!(board.address(), 0);
    assert_eq!(board.level(PINOUT.control.output_enable.line), Level::High);

    let mut relay = Serial::new(&mut terminal);
    dumper.tick(&mut board, &mut relay);
    drop(relay);
    assert_eq!(dumper.counter(), 1);
    assert_eq!(&terminal.sent[..], b"\n");
    assert_eq!(board.level(PINOUT.control.output_enable.line), Level::Low);
}

#[test]
fn nothing_moves_before_the_start_byte() {
    init();
    let contents = [0xa5; 32];
    let mut dumper = Dumper::new(PINOUT);
    let mut board = Board::new(PINOUT, &contents);
    dumper.bring_up(&mut board);
    let mut terminal = Terminal::new();

    // noise is ignored, only the carriage return releases the wait
    terminal.press(b'x');
    terminal.press(0x0a);
    terminal.press(0x0d);
    wait_start(&mut terminal).unwrap();
    assert!(terminal.sent.is_empty());
    assert_eq!(board.level(PINOUT.control.output_enable.line), Level::High);
    assert_eq!(board.level(PINOUT.control.write_enable.line), Level::High);
    // the chip is already selected from bring up, it just is not read yet
    assert_eq!(board.level(PINOUT.control.chip_enable.line), Level::Low);

    // the first tick after the handshake is the address phase of address 0
    assert_eq!(dumper.counter(), 0);
    assert_eq!(dumper.address(), 0);
    assert_eq!(dumper.phase(), Phase::Address);
    let mut relay = Serial::new(&mut terminal);
    dumper.tick(&mut board, &mut relay);
    drop(relay);
    assert_eq!(&terminal.sent[..], b"\n");
    assert_eq!(board.address(), 0);
    assert_eq!(board.level(PINOUT.control.output_enable.line), Level::Low);
}


/// records every port call in order
#[derive(Default)]
struct Journal {
    calls: Vec<Call>,
}
#[derive(Copy, Clone, PartialEq, Debug)]
enum Call {
    Configure(Line, Mode),
    Set(Line, Level),
}
impl Port for Journal {
    fn configure(&mut self, line: Line, mode: Mode) {
        self.calls.push(Call::Configure(line, mode));
    }
    fn set(&mut self, line: Line, level: Level) {
        self.calls.push(Call::Set(line, level));
    }
    fn get(&mut self, _line: Line) -> Level {Level::High}
}

#[test]
fn bring_up_parks_controls_before_switching_them() {
    init();
    let mut journal = Journal::default();
    Dumper::new(PINOUT).bring_up(&mut journal);
    let controls = PINOUT.control;

    // every control is released first, while its line is still an input
    assert_eq!(journal.calls[.. 3], [
        Call::Set(controls.output_enable.line, Level::High),
        Call::Set(controls.chip_enable.line, Level::High),
        Call::Set(controls.write_enable.line, Level::High),
    ]);
    assert_eq!(journal.calls[3 .. 6], [
        Call::Configure(controls.output_enable.line, Mode::Output(Drive::OpenDrain)),
        Call::Configure(controls.chip_enable.line, Mode::Output(Drive::OpenDrain)),
        Call::Configure(controls.write_enable.line, Mode::Output(Drive::OpenDrain)),
    ]);
    // then the buses, then the chip selected last
    for call in &journal.calls[6 .. 11] {
        assert!(matches!(call, Call::Configure(_, Mode::Output(Drive::PushPull))));
    }
    for call in &journal.calls[11 .. 19] {
        assert!(matches!(call, Call::Configure(_, Mode::Input(Pull::Floating))));
    }
    assert_eq!(journal.calls[19 ..], [Call::Set(controls.chip_enable.line, Level::Low)]);
    assert_eq!(journal.calls.len(), 20);
}
