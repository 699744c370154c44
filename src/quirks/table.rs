//! Built-in touchscreen quirk table.
//!
//! Entries are sorted alphabetically by model and evaluated in this order;
//! the first fully matching entry wins. A rule with generic criteria shadows
//! every later rule sharing them, so keep more specific variants first.

use super::record::{ConfigurationRecord, FirmwareDescriptor, Property};
use super::{ConfigurationRule, MatchCriterion};
use crate::detect::dmi::DmiField::{self, *};
use crate::error::Result;
use std::sync::Arc;

const SILEAD_FW_PREFIX: &[u8] = &[0xf0, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00];

/// Boards with EFI-embedded firmware that need no other properties.
const EFI_EMBEDDED_FW_PROPS: &[Property] = &[Property::flag("efi-embedded-firmware")];

const CHUWI_HI8_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1665),
    Property::u32("touchscreen-size-y", 1140),
    Property::flag("touchscreen-swapped-x-y"),
    Property::flag("silead,home-button"),
    Property::string("firmware-name", "gsl1680-chuwi-hi8.fw"),
];

const CHUWI_HI8_PRO_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1728),
    Property::u32("touchscreen-size-y", 1148),
    Property::flag("touchscreen-swapped-x-y"),
    Property::string("firmware-name", "gsl3680-chuwi-hi8-pro.fw"),
    Property::flag("silead,home-button"),
    Property::flag("efi-embedded-firmware"),
];

const CHUWI_HI8_PRO_FW: FirmwareDescriptor = FirmwareDescriptor::new(
    "silead/gsl3680-chuwi-hi8-pro.fw",
    SILEAD_FW_PREFIX,
    39864,
    [
        0xc0, 0x88, 0xc5, 0xef, 0xd1, 0x70, 0x77, 0x59, 0x4e, 0xe9, 0xc4, 0xd8, 0x2e, 0xcd, 0xbf,
        0x95, 0x32, 0xd9, 0x03, 0x28, 0x0d, 0x48, 0x9f, 0x92, 0x35, 0x37, 0xf6, 0x8b, 0x2a, 0xe4,
        0x73, 0xff,
    ],
);

const CHUWI_VI8_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1724),
    Property::u32("touchscreen-size-y", 1140),
    Property::flag("touchscreen-swapped-x-y"),
    Property::string("firmware-name", "gsl3676-chuwi-vi8.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const CHUWI_VI8_PLUS_FW: FirmwareDescriptor = FirmwareDescriptor::new(
    "chipone/icn8505-HAMP0002.fw",
    &[0xb0, 0x07, 0x00, 0x00, 0xe4, 0x07, 0x00, 0x00],
    35012,
    [
        0x93, 0xe5, 0x49, 0xe0, 0xb6, 0xa2, 0xb4, 0xb3, 0x88, 0x96, 0x34, 0x97, 0x5e, 0xa8, 0x13,
        0x78, 0x72, 0x98, 0xb8, 0x29, 0xeb, 0x5c, 0xa7, 0xf1, 0x25, 0x13, 0x43, 0xf4, 0x30, 0x7c,
        0xfc, 0x7c,
    ],
);

const CHUWI_VI10_PROPS: &[Property] = &[
    Property::u32("touchscreen-min-x", 0),
    Property::u32("touchscreen-min-y", 4),
    Property::u32("touchscreen-size-x", 1858),
    Property::u32("touchscreen-size-y", 1280),
    Property::string("firmware-name", "gsl3680-chuwi-vi10.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const CONNECT_TABLET9_PROPS: &[Property] = &[
    Property::u32("touchscreen-min-x", 9),
    Property::u32("touchscreen-min-y", 8),
    Property::u32("touchscreen-size-x", 1664),
    Property::u32("touchscreen-size-y", 878),
    Property::flag("touchscreen-inverted-y"),
    Property::flag("touchscreen-swapped-x-y"),
    Property::string("firmware-name", "gsl1680-connect-tablet9.fw"),
    Property::u32("silead,max-fingers", 10),
];

const CUBE_IWORK8_AIR_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1660),
    Property::u32("touchscreen-size-y", 900),
    Property::flag("touchscreen-swapped-x-y"),
    Property::string("firmware-name", "gsl3670-cube-iwork8-air.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("efi-embedded-firmware"),
];

const CUBE_IWORK8_AIR_FW: FirmwareDescriptor = FirmwareDescriptor::new(
    "silead/gsl3670-cube-iwork8-air.fw",
    SILEAD_FW_PREFIX,
    38808,
    [
        0xff, 0x62, 0x2d, 0xd1, 0x8a, 0x78, 0x04, 0x7b, 0x33, 0x06, 0xb0, 0x4f, 0x7f, 0x02, 0x08,
        0x9c, 0x96, 0xd4, 0x9f, 0x04, 0xe1, 0x47, 0x25, 0x25, 0x60, 0x77, 0x41, 0x33, 0xeb, 0x12,
        0x82, 0xfc,
    ],
);

const CUBE_KNOTE_I1101_PROPS: &[Property] = &[
    Property::u32("touchscreen-min-x", 20),
    Property::u32("touchscreen-min-y", 22),
    Property::u32("touchscreen-size-x", 1961),
    Property::u32("touchscreen-size-y", 1513),
    Property::string("firmware-name", "gsl3692-cube-knote-i1101.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const DEXP_URSUS_7W_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 890),
    Property::u32("touchscreen-size-y", 630),
    Property::string("firmware-name", "gsl1686-dexp-ursus-7w.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const DIGMA_CITI_E200_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1980),
    Property::u32("touchscreen-size-y", 1500),
    Property::flag("touchscreen-inverted-y"),
    Property::string("firmware-name", "gsl1686-digma_citi_e200.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const GP_ELECTRONIC_T701_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 960),
    Property::u32("touchscreen-size-y", 640),
    Property::flag("touchscreen-inverted-x"),
    Property::flag("touchscreen-inverted-y"),
    Property::string("firmware-name", "gsl1680-gp-electronic-t701.fw"),
];

const ITWORKS_TW891_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1600),
    Property::u32("touchscreen-size-y", 890),
    Property::flag("touchscreen-inverted-y"),
    Property::flag("touchscreen-swapped-x-y"),
    Property::string("firmware-name", "gsl3670-itworks-tw891.fw"),
];

const JUMPER_EZPAD_6_PRO_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1980),
    Property::u32("touchscreen-size-y", 1500),
    Property::string("firmware-name", "gsl3692-jumper-ezpad-6-pro.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const JUMPER_EZPAD_MINI3_PROPS: &[Property] = &[
    Property::u32("touchscreen-min-x", 23),
    Property::u32("touchscreen-min-y", 16),
    Property::u32("touchscreen-size-x", 1699),
    Property::u32("touchscreen-size-y", 1138),
    Property::flag("touchscreen-swapped-x-y"),
    Property::string("firmware-name", "gsl3676-jumper-ezpad-mini3.fw"),
    Property::u32("silead,max-fingers", 10),
];

const ONDA_OBOOK_20_PLUS_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1728),
    Property::u32("touchscreen-size-y", 1148),
    Property::flag("touchscreen-inverted-x"),
    Property::flag("touchscreen-inverted-y"),
    Property::flag("touchscreen-swapped-x-y"),
    Property::string("firmware-name", "gsl3676-onda-obook-20-plus.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const ONDA_V820W_32G_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1665),
    Property::u32("touchscreen-size-y", 1140),
    Property::flag("touchscreen-swapped-x-y"),
    Property::string("firmware-name", "gsl1680-onda-v820w-32g.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const ONDA_V891W_V1_PROPS: &[Property] = &[
    Property::u32("touchscreen-min-x", 46),
    Property::u32("touchscreen-min-y", 8),
    Property::u32("touchscreen-size-x", 1676),
    Property::u32("touchscreen-size-y", 1130),
    Property::string("firmware-name", "gsl3680-onda-v891w-v1.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const ONDA_V891W_V3_PROPS: &[Property] = &[
    Property::u32("touchscreen-min-x", 35),
    Property::u32("touchscreen-min-y", 15),
    Property::u32("touchscreen-size-x", 1625),
    Property::u32("touchscreen-size-y", 1135),
    Property::flag("touchscreen-inverted-y"),
    Property::string("firmware-name", "gsl3676-onda-v891w-v3.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const PIPO_W2S_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1660),
    Property::u32("touchscreen-size-y", 880),
    Property::flag("touchscreen-inverted-x"),
    Property::flag("touchscreen-swapped-x-y"),
    Property::string("firmware-name", "gsl1680-pipo-w2s.fw"),
    Property::flag("efi-embedded-firmware"),
];

const PIPO_W2S_FW: FirmwareDescriptor = FirmwareDescriptor::new(
    "silead/gsl1680-pipo-w2s.fw",
    SILEAD_FW_PREFIX,
    39072,
    [
        0xd0, 0x58, 0xc4, 0x7d, 0x55, 0x2d, 0x62, 0x18, 0xd1, 0x6a, 0x71, 0x73, 0x0b, 0x3f, 0xbe,
        0x60, 0xbb, 0x45, 0x8c, 0x52, 0x27, 0xb7, 0x18, 0xf4, 0x31, 0x00, 0x6a, 0x49, 0x76, 0xd8,
        0x7c, 0xd3,
    ],
);

const POV_MOBII_WINTAB_P800W_V20_PROPS: &[Property] = &[
    Property::u32("touchscreen-min-x", 32),
    Property::u32("touchscreen-min-y", 16),
    Property::u32("touchscreen-size-x", 1692),
    Property::u32("touchscreen-size-y", 1146),
    Property::flag("touchscreen-swapped-x-y"),
    Property::string("firmware-name", "gsl3680-pov-mobii-wintab-p800w-v20.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const POV_MOBII_WINTAB_P800W_V21_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1800),
    Property::u32("touchscreen-size-y", 1150),
    Property::flag("touchscreen-swapped-x-y"),
    Property::string("firmware-name", "gsl3692-pov-mobii-wintab-p800w.fw"),
    Property::flag("silead,home-button"),
];

const TECLAST_X3_PLUS_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1980),
    Property::u32("touchscreen-size-y", 1500),
    Property::string("firmware-name", "gsl1680-teclast-x3-plus.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const TECLAST_X98PLUS2_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 2048),
    Property::u32("touchscreen-size-y", 1280),
    Property::flag("touchscreen-inverted-x"),
    Property::flag("touchscreen-inverted-y"),
    Property::string("firmware-name", "gsl1686-teclast_x98plus2.fw"),
    Property::u32("silead,max-fingers", 10),
];

const TREKSTOR_PRIMEBOOK_C13_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 2624),
    Property::u32("touchscreen-size-y", 1920),
    Property::string("firmware-name", "gsl1680-trekstor-primebook-c13.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const TREKSTOR_SURFTAB_TWIN_10_1_PROPS: &[Property] = &[
    Property::u32("touchscreen-size-x", 1900),
    Property::u32("touchscreen-size-y", 1280),
    Property::u32("touchscreen-inverted-y", 1),
    Property::string("firmware-name", "gsl3670-surftab-twin-10-1-st10432-8.fw"),
    Property::u32("silead,max-fingers", 10),
];

const TREKSTOR_SURFTAB_WINTRON70_PROPS: &[Property] = &[
    Property::u32("touchscreen-min-x", 12),
    Property::u32("touchscreen-min-y", 8),
    Property::u32("touchscreen-size-x", 884),
    Property::u32("touchscreen-size-y", 632),
    Property::string("firmware-name", "gsl1686-surftab-wintron70-st70416-6.fw"),
    Property::u32("silead,max-fingers", 10),
    Property::flag("silead,home-button"),
];

const SILEAD: &str = "MSSL1680:00";

fn m(field: DmiField, value: &'static str) -> MatchCriterion {
    MatchCriterion::substring(field, value)
}

fn exact(field: DmiField, value: &'static str) -> MatchCriterion {
    MatchCriterion::exact(field, value)
}

fn record(
    model: &'static str,
    target: &'static str,
    properties: &'static [Property],
    firmware: Option<FirmwareDescriptor>,
) -> Result<Arc<ConfigurationRecord>> {
    ConfigurationRecord::new(model, target, properties, firmware).map(Arc::new)
}

fn rule<const N: usize>(
    name: &'static str,
    criteria: [MatchCriterion; N],
    record: &Arc<ConfigurationRecord>,
) -> Result<ConfigurationRule> {
    ConfigurationRule::new(name, criteria, Arc::clone(record))
}

/// Build the built-in rule table. Fails only on malformed table data.
pub fn builtin_rules() -> Result<Vec<ConfigurationRule>> {
    let chuwi_hi8 = record("Chuwi Hi8", "MSSL0001:00", CHUWI_HI8_PROPS, None)?;
    let chuwi_hi8_pro = record(
        "Chuwi Hi8 Pro",
        SILEAD,
        CHUWI_HI8_PRO_PROPS,
        Some(CHUWI_HI8_PRO_FW),
    )?;
    let chuwi_vi8 = record("Chuwi Vi8", SILEAD, CHUWI_VI8_PROPS, None)?;
    let chuwi_vi8_plus = record(
        "Chuwi Vi8 Plus",
        "CHPN0001:00",
        EFI_EMBEDDED_FW_PROPS,
        Some(CHUWI_VI8_PLUS_FW),
    )?;
    let chuwi_vi10 = record("Chuwi Vi10", "MSSL0002:00", CHUWI_VI10_PROPS, None)?;
    let connect_tablet9 = record("Connect Tablet 9", SILEAD, CONNECT_TABLET9_PROPS, None)?;
    let cube_iwork8_air = record(
        "CUBE iwork8 Air",
        SILEAD,
        CUBE_IWORK8_AIR_PROPS,
        Some(CUBE_IWORK8_AIR_FW),
    )?;
    let cube_knote_i1101 = record("Cube KNote i1101", SILEAD, CUBE_KNOTE_I1101_PROPS, None)?;
    let dexp_ursus_7w = record("DEXP Ursus 7W", SILEAD, DEXP_URSUS_7W_PROPS, None)?;
    let digma_citi_e200 = record("Digma Citi E200", SILEAD, DIGMA_CITI_E200_PROPS, None)?;
    let gp_electronic_t701 =
        record("GP-electronic T701", SILEAD, GP_ELECTRONIC_T701_PROPS, None)?;
    let itworks_tw891 = record("I.T.Works TW891", SILEAD, ITWORKS_TW891_PROPS, None)?;
    let jumper_ezpad_6_pro =
        record("Jumper EZpad 6 Pro", SILEAD, JUMPER_EZPAD_6_PRO_PROPS, None)?;
    let jumper_ezpad_mini3 =
        record("Jumper EZpad mini3", SILEAD, JUMPER_EZPAD_MINI3_PROPS, None)?;
    let onda_obook_20_plus =
        record("Onda oBook 20 Plus", SILEAD, ONDA_OBOOK_20_PLUS_PROPS, None)?;
    let onda_v820w_32g = record("ONDA V820w DualOS", SILEAD, ONDA_V820W_32G_PROPS, None)?;
    let onda_v891w_v1 = record("ONDA V891w v1", SILEAD, ONDA_V891W_V1_PROPS, None)?;
    let onda_v891w_v3 = record("ONDA V891w v3", SILEAD, ONDA_V891W_V3_PROPS, None)?;
    let pipo_w2s = record("Pipo W2S", SILEAD, PIPO_W2S_PROPS, Some(PIPO_W2S_FW))?;
    let pov_p800w_v20 = record(
        "Point of View mobii wintab p800w (v2.0)",
        SILEAD,
        POV_MOBII_WINTAB_P800W_V20_PROPS,
        None,
    )?;
    let pov_p800w_v21 = record(
        "Point of View mobii wintab p800w (v2.1)",
        SILEAD,
        POV_MOBII_WINTAB_P800W_V21_PROPS,
        None,
    )?;
    let teclast_x3_plus = record("Teclast X3 Plus", SILEAD, TECLAST_X3_PLUS_PROPS, None)?;
    let teclast_x98plus2 = record("Teclast X98 Plus II", SILEAD, TECLAST_X98PLUS2_PROPS, None)?;
    let trekstor_primebook_c13 = record(
        "Trekstor Primebook C13",
        SILEAD,
        TREKSTOR_PRIMEBOOK_C13_PROPS,
        None,
    )?;
    let trekstor_surftab_twin_10_1 = record(
        "TrekStor SurfTab twin 10.1",
        SILEAD,
        TREKSTOR_SURFTAB_TWIN_10_1_PROPS,
        None,
    )?;
    let trekstor_surftab_wintron70 = record(
        "Trekstor Surftab Wintron 7.0",
        SILEAD,
        TREKSTOR_SURFTAB_WINTRON70_PROPS,
        None,
    )?;

    Ok(vec![
        rule(
            "Chuwi Hi8",
            [m(SysVendor, "ilife"), m(ProductName, "S806")],
            &chuwi_hi8,
        )?,
        rule(
            "Chuwi Hi8 (H1D_S806_206)",
            [
                m(SysVendor, "Insyde"),
                m(ProductName, "BayTrail"),
                m(BiosVersion, "H1D_S806_206"),
            ],
            &chuwi_hi8,
        )?,
        rule(
            "Chuwi Hi8 Pro (CWI513)",
            [m(SysVendor, "Hampoo"), m(ProductName, "X1D3_C806N")],
            &chuwi_hi8_pro,
        )?,
        rule(
            "Chuwi Vi8 (CWI506)",
            [
                m(SysVendor, "Insyde"),
                m(ProductName, "i86"),
                m(BiosVersion, "CHUWI.D86JLBNR"),
            ],
            &chuwi_vi8,
        )?,
        rule(
            "Chuwi Vi8 Plus (CWI519)",
            [
                m(SysVendor, "Hampoo"),
                m(ProductName, "D2D3_Vi8A1"),
                m(BoardName, "Cherry Trail CR"),
            ],
            &chuwi_vi8_plus,
        )?,
        rule(
            "Chuwi Vi10 (CWI505)",
            [
                m(BoardVendor, "Hampoo"),
                m(BoardName, "BYT-PF02"),
                m(SysVendor, "ilife"),
                m(ProductName, "S165"),
            ],
            &chuwi_vi10,
        )?,
        rule(
            "Connect Tablet 9",
            [m(SysVendor, "Connect"), m(ProductName, "Tablet 9")],
            &connect_tablet9,
        )?,
        rule(
            "CUBE iwork8 Air",
            [
                m(SysVendor, "cube"),
                m(ProductName, "i1-TF"),
                m(BoardName, "Cherry Trail CR"),
            ],
            &cube_iwork8_air,
        )?,
        rule(
            "Cube KNote i1101",
            [
                m(BoardVendor, "Hampoo"),
                m(BoardName, "L1W6_I1101"),
                m(SysVendor, "ALLDOCUBE"),
                m(ProductName, "i1101"),
            ],
            &cube_knote_i1101,
        )?,
        rule(
            "DEXP Ursus 7W",
            [m(SysVendor, "Insyde"), m(ProductName, "7W")],
            &dexp_ursus_7w,
        )?,
        rule(
            "Digma Citi E200",
            [
                m(SysVendor, "Digma"),
                m(ProductName, "CITI E200"),
                m(BoardName, "Cherry Trail CR"),
            ],
            &digma_citi_e200,
        )?,
        rule(
            "GP-electronic T701",
            [
                m(SysVendor, "Insyde"),
                m(ProductName, "T701"),
                m(BiosVersion, "BYT70A.YNCHENG.WIN.007"),
            ],
            &gp_electronic_t701,
        )?,
        // same hardware as the Trekstor ST70416-6
        rule(
            "I.T.Works TW701",
            [
                m(SysVendor, "Insyde"),
                m(ProductName, "i71c"),
                m(BiosVersion, "itWORKS.G.WI71C.JGBMRB"),
            ],
            &trekstor_surftab_wintron70,
        )?,
        rule(
            "I.T.Works TW891",
            [m(SysVendor, "To be filled by O.E.M."), m(ProductName, "TW891")],
            &itworks_tw891,
        )?,
        rule(
            "Jumper EZpad 6 Pro",
            [
                m(SysVendor, "Jumper"),
                m(ProductName, "EZpad"),
                m(BiosVersion, "5.12"),
                // vendor/product/bios version alone are too generic
                m(BiosDate, "08/18/2017"),
            ],
            &jumper_ezpad_6_pro,
        )?,
        rule(
            "Jumper EZpad mini3",
            [
                m(SysVendor, "Insyde"),
                // jumperx.T87.KFBNEEA02 with the version number dropped
                m(BiosVersion, "jumperx.T87.KFBNEEA"),
            ],
            &jumper_ezpad_mini3,
        )?,
        rule(
            "Onda oBook 20 Plus",
            [m(SysVendor, "ONDA"), m(ProductName, "OBOOK 20 PLUS")],
            &onda_obook_20_plus,
        )?,
        rule(
            "ONDA V820w DualOS",
            [
                exact(BoardVendor, "ONDA"),
                exact(ProductName, "V820w DualOS"),
            ],
            &onda_v820w_32g,
        )?,
        rule(
            "ONDA V891w revision P891WBEBV1B00 aka v1",
            [
                exact(BoardVendor, "ONDA"),
                exact(BoardName, "ONDA Tablet"),
                exact(BoardVersion, "V001"),
                // different BIOS versions need different firmware
                exact(BiosVersion, "ONDA.W89EBBN08"),
            ],
            &onda_v891w_v1,
        )?,
        rule(
            "ONDA V891w Dual OS P891DCF2V1A01274 64GB",
            [
                m(SysVendor, "Insyde"),
                m(ProductName, "ONDA Tablet"),
                m(BiosVersion, "ONDA.D890HBBNR0A"),
            ],
            &onda_v891w_v3,
        )?,
        rule(
            "Pipo W2S",
            [m(SysVendor, "PIPO"), m(ProductName, "W2S")],
            &pipo_w2s,
        )?,
        // same hardware as the Trekstor ST70416-6
        rule(
            "Ployer Momo7w",
            [
                m(SysVendor, "Shenzhen PLOYER"),
                m(ProductName, "MOMO7W"),
                m(BiosVersion, "MOMO.G.WI71C.MABMRBA02"),
            ],
            &trekstor_surftab_wintron70,
        )?,
        rule(
            "Point of View mobii wintab p800w (v2.0)",
            [
                m(BoardVendor, "AMI Corporation"),
                m(BoardName, "Aptio CRB"),
                m(BiosVersion, "3BAIR1014"),
                m(BiosDate, "10/24/2014"),
            ],
            &pov_p800w_v20,
        )?,
        rule(
            "Point of View mobii wintab p800w (v2.1)",
            [
                m(BoardVendor, "AMI Corporation"),
                m(BoardName, "Aptio CRB"),
                m(BiosVersion, "3BAIR1013"),
                m(BiosDate, "08/22/2014"),
            ],
            &pov_p800w_v21,
        )?,
        rule(
            "Teclast X3 Plus",
            [
                m(SysVendor, "TECLAST"),
                m(ProductName, "X3 Plus"),
                m(BoardName, "X3 Plus"),
            ],
            &teclast_x3_plus,
        )?,
        rule(
            "Teclast X98 Plus II",
            [m(SysVendor, "TECLAST"), m(ProductName, "X98 Plus II")],
            &teclast_x98plus2,
        )?,
        rule(
            "Trekstor Primebook C13",
            [m(SysVendor, "TREKSTOR"), m(ProductName, "Primebook C13")],
            &trekstor_primebook_c13,
        )?,
        rule(
            "TrekStor SurfTab twin 10.1 ST10432-8",
            [m(SysVendor, "TrekStor"), m(ProductName, "SurfTab twin 10.1")],
            &trekstor_surftab_twin_10_1,
        )?,
        rule(
            "Trekstor Surftab Wintron 7.0 ST70416-6",
            [
                m(SysVendor, "Insyde"),
                m(ProductName, "ST70416-6"),
                m(BiosVersion, "TREK.G.WI71C.JGBMRBA04"),
            ],
            &trekstor_surftab_wintron70,
        )?,
        rule(
            "Trekstor Surftab Wintron 7.0 ST70416-6, newer BIOS",
            [
                m(SysVendor, "TrekStor"),
                m(ProductName, "SurfTab wintron 7.0 ST70416-6"),
                m(BiosVersion, "TREK.G.WI71C.JGBMRBA05"),
            ],
            &trekstor_surftab_wintron70,
        )?,
        // same case and touchscreen as the Chuwi Vi8
        rule(
            "Yours Y8W81",
            [m(SysVendor, "YOURS"), m(ProductName, "Y8W81")],
            &chuwi_vi8,
        )?,
    ])
}
