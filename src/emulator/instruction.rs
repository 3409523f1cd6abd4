use crate::emulator::decoder::Decoded;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set with the SCHIP extensions.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - KK: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ScrollDown(Const), // 00CN
    ClearScreen, // 00E0
    Return, // 00EE
    ScrollRight, // 00FB
    ScrollLeft, // 00FC
    Exit, // 00FD
    LowRes, // 00FE
    HighRes, // 00FF
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XKK
    IfRegNeqConst(Reg, Const), // 4XKK
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XKK
    IncRegByConst(Reg, Const), // 7XKK
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXKK
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
    /// Anything else, including the `0NNN` machine routine calls.
    /// Executes as a no-op.
    Unknown(u16),
}

impl Instruction {

    pub fn from_u16(value: u16) -> Instruction {
        Instruction::decode(Decoded::from_u16(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Instruction {
        Instruction::decode(Decoded::from_two_u8(left, right))
    }

    /// Turn the raw fields into an instruction.
    ///
    /// The SCHIP patterns in class 0 ignore the X nibble, and are matched
    /// before the standard set.
    pub fn decode(op: Decoded) -> Instruction {
        let x = Reg(op.x);
        let y = Reg(op.y);
        let kk = Const(op.kk);
        let nnn = Addr(op.nnn);

        match op.as_four_u8() {
            (0, _, 0xF, 0xB) => Instruction::ScrollRight,
            (0, _, 0xF, 0xC) => Instruction::ScrollLeft,
            (0, _, 0xF, 0xD) => Instruction::Exit,
            (0, _, 0xF, 0xE) => Instruction::LowRes,
            (0, _, 0xF, 0xF) => Instruction::HighRes,
            (0, _, 0xC, n) => Instruction::ScrollDown(Const(n)),
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Goto(nnn),
            (2, _, _, _) => Instruction::Call(nnn),
            (3, _, _, _) => Instruction::IfRegEqConst(x, kk),
            (4, _, _, _) => Instruction::IfRegNeqConst(x, kk),
            (5, _, _, _) => Instruction::IfRegEqReg(x, y),
            (6, _, _, _) => Instruction::SetRegToConst(x, kk),
            (7, _, _, _) => Instruction::IncRegByConst(x, kk),
            (8, _, _, 0) => Instruction::SetRegToReg(x, y),
            (8, _, _, 1) => Instruction::BitwiseOr(x, y),
            (8, _, _, 2) => Instruction::BitwiseAnd(x, y),
            (8, _, _, 3) => Instruction::BitwiseXor(x, y),
            (8, _, _, 4) => Instruction::IncRegByReg(x, y),
            (8, _, _, 5) => Instruction::DecRegByReg(x, y),
            (8, _, _, 6) => Instruction::BitshiftRight(x),
            (8, _, _, 7) => Instruction::SetVxVyMinusVx(x, y),
            (8, _, _, 0xE) => Instruction::BitshiftLeft(x),
            (9, _, _, _) => Instruction::IfRegNeqReg(x, y),
            (0xA, _, _, _) => Instruction::SetI(nnn),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(nnn),
            (0xC, _, _, _) => Instruction::SetVxRand(x, kk),
            (0xD, _, _, n) => Instruction::Draw(x, y, Const(n)),
            (0xE, _, 9, 0xE) => Instruction::IfKeyEqVx(x),
            (0xE, _, 0xA, 1) => Instruction::IfKeyNeqVx(x),
            (0xF, _, 0, 7) => Instruction::SetRegToDelayTimer(x),
            (0xF, _, 0, 0xA) => Instruction::SetRegToGetKey(x),
            (0xF, _, 1, 5) => Instruction::SetDelayTimerToReg(x),
            (0xF, _, 1, 8) => Instruction::SetSoundTimerToReg(x),
            (0xF, _, 1, 0xE) => Instruction::AddRegToI(x),
            (0xF, _, 2, 9) => Instruction::SetIToSpriteAddrVx(x),
            (0xF, _, 3, 3) => Instruction::SetIToBcdOfReg(x),
            (0xF, _, 5, 5) => Instruction::RegDump(x),
            (0xF, _, 6, 5) => Instruction::RegLoad(x),
            _ => Instruction::Unknown(op.opcode),
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(0x00C4, Instruction::ScrollDown(Const(4)) ; "scroll down")]
    #[test_case(0x00E0, Instruction::ClearScreen ; "clear screen")]
    #[test_case(0x00EE, Instruction::Return ; "return")]
    #[test_case(0x00FB, Instruction::ScrollRight ; "scroll right")]
    #[test_case(0x00FC, Instruction::ScrollLeft ; "scroll left")]
    #[test_case(0x00FD, Instruction::Exit ; "exit")]
    #[test_case(0x00FE, Instruction::LowRes ; "low res")]
    #[test_case(0x00FF, Instruction::HighRes ; "high res")]
    #[test_case(0x1025, Instruction::Goto(Addr(0x25)) ; "goto")]
    #[test_case(0x2037, Instruction::Call(Addr(0x37)) ; "call")]
    #[test_case(0x3A08, Instruction::IfRegEqConst(Reg(0xA), Const(8)) ; "skip eq const")]
    #[test_case(0x4A08, Instruction::IfRegNeqConst(Reg(0xA), Const(8)) ; "skip neq const")]
    #[test_case(0x5AB0, Instruction::IfRegEqReg(Reg(0xA), Reg(0xB)) ; "skip eq reg")]
    #[test_case(0x5AB1, Instruction::IfRegEqReg(Reg(0xA), Reg(0xB)) ; "skip eq reg ignores low nibble")]
    #[test_case(0x6B23, Instruction::SetRegToConst(Reg(0xB), Const(0x23)) ; "load const")]
    #[test_case(0x7CA1, Instruction::IncRegByConst(Reg(0xC), Const(0xA1)) ; "add const")]
    #[test_case(0x8AB0, Instruction::SetRegToReg(Reg(0xA), Reg(0xB)) ; "assign")]
    #[test_case(0x8DE1, Instruction::BitwiseOr(Reg(0xD), Reg(0xE)) ; "or")]
    #[test_case(0x8DE2, Instruction::BitwiseAnd(Reg(0xD), Reg(0xE)) ; "and")]
    #[test_case(0x8DE3, Instruction::BitwiseXor(Reg(0xD), Reg(0xE)) ; "xor")]
    #[test_case(0x8AB4, Instruction::IncRegByReg(Reg(0xA), Reg(0xB)) ; "add reg")]
    #[test_case(0x8AB5, Instruction::DecRegByReg(Reg(0xA), Reg(0xB)) ; "sub reg")]
    #[test_case(0x8AB6, Instruction::BitshiftRight(Reg(0xA)) ; "shift right")]
    #[test_case(0x8AB7, Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB)) ; "subn")]
    #[test_case(0x8A0E, Instruction::BitshiftLeft(Reg(0xA)) ; "shift left")]
    #[test_case(0x9AB0, Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB)) ; "skip neq reg")]
    #[test_case(0x9AB7, Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB)) ; "skip neq reg ignores low nibble")]
    #[test_case(0xA025, Instruction::SetI(Addr(0x25)) ; "set i")]
    #[test_case(0xB025, Instruction::SetPcToV0PlusAddr(Addr(0x25)) ; "jump offset")]
    #[test_case(0xCA23, Instruction::SetVxRand(Reg(0xA), Const(0x23)) ; "random")]
    #[test_case(0xDABC, Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC)) ; "draw")]
    #[test_case(0xEA9E, Instruction::IfKeyEqVx(Reg(0xA)) ; "skip key pressed")]
    #[test_case(0xEAA1, Instruction::IfKeyNeqVx(Reg(0xA)) ; "skip key not pressed")]
    #[test_case(0xFA07, Instruction::SetRegToDelayTimer(Reg(0xA)) ; "read delay")]
    #[test_case(0xFA0A, Instruction::SetRegToGetKey(Reg(0xA)) ; "wait key")]
    #[test_case(0xFA15, Instruction::SetDelayTimerToReg(Reg(0xA)) ; "write delay")]
    #[test_case(0xFA18, Instruction::SetSoundTimerToReg(Reg(0xA)) ; "write sound")]
    #[test_case(0xFA1E, Instruction::AddRegToI(Reg(0xA)) ; "add to i")]
    #[test_case(0xFA29, Instruction::SetIToSpriteAddrVx(Reg(0xA)) ; "font glyph")]
    #[test_case(0xFA33, Instruction::SetIToBcdOfReg(Reg(0xA)) ; "bcd")]
    #[test_case(0xFA55, Instruction::RegDump(Reg(0xA)) ; "store registers")]
    #[test_case(0xFA65, Instruction::RegLoad(Reg(0xA)) ; "load registers")]
    fn opcodes_are_parsed_correctly(opcode: u16, expected: Instruction) {
        assert_eq!(Instruction::from_u16(opcode), expected);
    }

    #[test_case(0x0123 ; "machine routine")]
    #[test_case(0x8AB8 ; "unused alu op")]
    #[test_case(0xEA00 ; "unused key op")]
    #[test_case(0xFA99 ; "unused misc op")]
    #[test_case(0x01E0 ; "clear screen with x nibble")]
    fn unrecognized_opcodes_are_unknown(opcode: u16) {
        assert_eq!(Instruction::from_u16(opcode), Instruction::Unknown(opcode));
    }

    #[test]
    fn schip_patterns_ignore_x_nibble() {
        assert_eq!(Instruction::from_u16(0x03FB), Instruction::ScrollRight);
        assert_eq!(Instruction::from_u16(0x0AFF), Instruction::HighRes);
        assert_eq!(Instruction::from_u16(0x05C2), Instruction::ScrollDown(Const(2)));
    }

    #[test]
    fn from_two_u8_equals_from_u16() {
        assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::from_u16(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::from_u16(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0x00, 0xFD), Instruction::from_u16(0x00FD));
    }
}
