
/// lowercase hex digits, indexed by value
pub(crate) const XDIGITS: [u8; 16] = *b"0123456789abcdef";

/// ascii hex digit for the low 4 bits of `value`
pub(crate) fn xdigit(value: u8) -> u8 {
    XDIGITS[usize::from(value & 0xf)]
}

/**
    build a `[Line; N]` wiring table from `(port, index)` couples, lsb first

    ```
    use promdump::{lines, bus::Bus};

    let address: Bus<3> = Bus::new(lines![(0, 12), (0, 15), (1, 3)]);
    ```
*/
#[macro_export]
macro_rules! lines {
    ($(($port:expr, $index:expr)),* $(,)?) => {
        [$($crate::bus::Line::new($port, $index)),*]
    };
}
