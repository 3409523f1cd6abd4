/// The addressing fields of a single 16-bit opcode.
///
/// Every possible word splits into these fields, whether or not it is
/// a recognized instruction, so decoding can never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// The full opcode.
    pub opcode: u16,
    /// Bits 12-15, the instruction class.
    pub class: u8,
    /// Bits 8-11, usually a register.
    pub x: u8,
    /// Bits 4-7, usually a register.
    pub y: u8,
    /// Bits 0-3.
    pub n: u8,
    /// The low byte.
    pub kk: u8,
    /// The low 12 bits, usually an address.
    pub nnn: u16,
}

impl Decoded {
    /// Split an opcode into its fields.
    pub fn from_u16(opcode: u16) -> Decoded {
        Decoded {
            opcode,
            class: (opcode >> 12) as u8,
            x: ((opcode >> 8) & 0xF) as u8,
            y: ((opcode >> 4) & 0xF) as u8,
            n: (opcode & 0xF) as u8,
            kk: (opcode & 0xFF) as u8,
            nnn: opcode & 0x0FFF,
        }
    }

    /// Join two bytes as they appear in memory, high byte first.
    pub fn from_two_u8(left: u8, right: u8) -> Decoded {
        Decoded::from_u16(u16::from_be_bytes([left, right]))
    }

    /// The four nibbles from most to least significant,
    /// convenient for matching on.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.class, self.x, self.y, self.n)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_all_fields() {
        let decoded = Decoded::from_u16(0xD12F);
        assert_eq!(
            decoded,
            Decoded {
                opcode: 0xD12F,
                class: 0xD,
                x: 0x1,
                y: 0x2,
                n: 0xF,
                kk: 0x2F,
                nnn: 0x12F,
            }
        );
    }

    #[test]
    fn bytes_are_big_endian() {
        assert_eq!(Decoded::from_two_u8(0x12, 0x34), Decoded::from_u16(0x1234));
        assert_eq!(Decoded::from_two_u8(0xF0, 0x0F).opcode, 0xF00F);
    }

    #[test]
    fn nibbles_in_order() {
        assert_eq!(Decoded::from_u16(0xABCD).as_four_u8(), (0xA, 0xB, 0xC, 0xD));
        assert_eq!(Decoded::from_u16(0x0000).as_four_u8(), (0, 0, 0, 0));
        assert_eq!(Decoded::from_u16(0xFFFF).as_four_u8(), (0xF, 0xF, 0xF, 0xF));
    }
}
