// pn532tag/src/device/profiles.rs

//! TgInitAsTarget parameter sets (everything after the command code)

/// PICC only, passive only: ISO14443-4 card emulation plus FeliCa
/// parameters. Used for Type 4 tag emulation.
pub const PICC_FELICA: &[u8] = &[
    0x05, // MODE: PICC only, passive only
    0x04, 0x00, // SENS_RES
    0x12, 0x34, 0x56, // NFCID1
    0x20, // SEL_RES: ISO14443-4 compliant
    // FeliCa POL_RES: NFCID2t (must start 01 FE), PAD, system code
    0x01, 0xFE, 0x05, 0x01, 0x86, 0x04, 0x02, 0x02, //
    0x03, 0x00, 0x4B, 0x02, 0x4F, 0x49, 0x8A, 0x00, //
    0xFF, 0xFF, //
    // NFCID3t
    0x01, 0x01, 0x66, 0x6D, 0x01, 0x01, 0x10, 0x02, 0x00, 0x00, //
    0x00, // general bytes length
    0x00, // historical bytes length
];

/// NFC-DEP target announcing LLCP in its general bytes.
pub const P2P_LLCP: &[u8] = &[
    0x00, // MODE
    0x00, 0x00, // SENS_RES
    0x00, 0x00, 0x00, // NFCID1
    0x40, // SEL_RES: DEP only
    // FeliCa POL_RES
    0x01, 0xFE, 0x0F, 0xBB, 0xBA, 0xA6, 0xC9, 0x89, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0xFF, 0xFF, //
    // NFCID3t
    0x01, 0xFE, 0x0F, 0xBB, 0xBA, 0xA6, 0xC9, 0x89, 0x00, 0x00, //
    // general bytes: LLCP magic number, version and MIUX
    0x0A, 0x46, 0x66, 0x6D, 0x01, 0x01, 0x10, 0x02, 0x02, 0x00, 0x80, //
    0x00, // historical bytes length
];

/// Which TgInitAsTarget configuration to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetProfile {
    /// Card emulation (ISO14443-4 PICC + FeliCa)
    #[default]
    PiccFelica,
    /// Peer-to-peer target with LLCP general bytes
    P2pLlcp,
}

impl TargetProfile {
    /// TgInitAsTarget parameter block for this profile
    pub fn params(self) -> &'static [u8] {
        match self {
            TargetProfile::PiccFelica => PICC_FELICA,
            TargetProfile::P2pLlcp => P2P_LLCP,
        }
    }
}
