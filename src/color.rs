// Colour string parsing for the renderer

use crate::lexer::ws;
use anyhow::{anyhow, Result};
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while_m_n},
    character::complete::char,
    combinator::{all_consuming, map, map_res, opt},
    number::complete::double,
    sequence::tuple,
    IResult,
};

/// An sRGB colour with straight alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl CssColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn to_plotters(self) -> plotters::style::RGBAColor {
        plotters::style::RGBAColor(self.r, self.g, self.b, self.a)
    }
}

/// Default colour cycle for traces without an explicit colour.
pub const COLORWAY: [CssColor; 10] = [
    CssColor::rgb(0x63, 0x6e, 0xfa),
    CssColor::rgb(0xef, 0x55, 0x3b),
    CssColor::rgb(0x00, 0xcc, 0x96),
    CssColor::rgb(0xab, 0x63, 0xfa),
    CssColor::rgb(0xff, 0xa1, 0x5a),
    CssColor::rgb(0x19, 0xd3, 0xf3),
    CssColor::rgb(0xff, 0x66, 0x92),
    CssColor::rgb(0xb6, 0xe8, 0x80),
    CssColor::rgb(0xff, 0x97, 0xff),
    CssColor::rgb(0xfe, 0xcb, 0x52),
];

pub fn default_color(trace_index: usize) -> CssColor {
    COLORWAY[trace_index % COLORWAY.len()]
}

/// Parse a hex, rgb(a), hsl(a) or CSS named colour.
pub fn parse_color(input: &str) -> Result<CssColor> {
    let trimmed = input.trim();

    if let Some(color) = named_color(trimmed) {
        return Ok(color);
    }

    all_consuming(alt((hex_color, rgb_function, hsl_function)))(trimmed)
        .map(|(_, color)| color)
        .map_err(|_| anyhow!("Invalid color '{}'", input))
}

fn named_color(name: &str) -> Option<CssColor> {
    let lower = name.to_ascii_lowercase();
    NAMED_COLORS
        .binary_search_by(|(n, _)| n.cmp(&lower.as_str()))
        .ok()
        .map(|idx| {
            let (r, g, b) = NAMED_COLORS[idx].1;
            CssColor::rgb(r, g, b)
        })
}

fn hex_digits(input: &str, digits: usize) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(digits, digits, |c: char| c.is_ascii_hexdigit()),
        |s: &str| u8::from_str_radix(s, 16),
    )(input)
}

fn hex_pair(input: &str) -> IResult<&str, u8> {
    hex_digits(input, 2)
}

// #abc is shorthand for #aabbcc
fn hex_single(input: &str) -> IResult<&str, u8> {
    let (input, v) = hex_digits(input, 1)?;
    Ok((input, v * 17))
}

fn hex_color(input: &str) -> IResult<&str, CssColor> {
    let (input, _) = char('#')(input)?;
    map(
        alt((
            all_consuming(tuple((hex_pair, hex_pair, hex_pair))),
            all_consuming(tuple((hex_single, hex_single, hex_single))),
        )),
        |(r, g, b)| CssColor::rgb(r, g, b),
    )(input)
}

/// A number optionally followed by `%`; percentages are scaled to `full`.
fn component(input: &str, full: f64) -> IResult<&str, f64> {
    let (input, value) = ws(double)(input)?;
    let (input, percent) = opt(ws(char('%')))(input)?;
    Ok((input, if percent.is_some() { value / 100.0 * full } else { value }))
}

/// Three comma-separated components and an optional alpha, inside parens.
fn arguments(input: &str, full: [f64; 3]) -> IResult<&str, ([f64; 3], f64)> {
    let (input, _) = ws(char('('))(input)?;
    let (input, a) = component(input, full[0])?;
    let (input, _) = char(',')(input)?;
    let (input, b) = component(input, full[1])?;
    let (input, _) = char(',')(input)?;
    let (input, c) = component(input, full[2])?;

    let (input, comma) = opt(char(','))(input)?;
    let (input, alpha) = match comma {
        Some(_) => component(input, 1.0)?,
        None => (input, 1.0),
    };

    let (input, _) = ws(char(')'))(input)?;
    Ok((input, ([a, b, c], alpha.clamp(0.0, 1.0))))
}

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn rgb_function(input: &str) -> IResult<&str, CssColor> {
    let (input, _) = alt((tag_no_case("rgba"), tag_no_case("rgb")))(input)?;
    let (input, ([r, g, b], a)) = arguments(input, [255.0; 3])?;

    Ok((
        input,
        CssColor {
            r: channel(r),
            g: channel(g),
            b: channel(b),
            a,
        },
    ))
}

fn hsl_function(input: &str) -> IResult<&str, CssColor> {
    let (input, _) = alt((tag_no_case("hsla"), tag_no_case("hsl")))(input)?;
    let (input, ([h, s, l], a)) = arguments(input, [360.0, 1.0, 1.0])?;

    let (r, g, b) = hsl_to_rgb(h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0));
    Ok((input, CssColor { r, g, b, a }))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    (
        channel((r1 + m) * 255.0),
        channel((g1 + m) * 255.0),
        channel((b1 + m) * 255.0),
    )
}

// Sorted by name for binary search.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("aliceblue", (240, 248, 255)),
    ("antiquewhite", (250, 235, 215)),
    ("aqua", (0, 255, 255)),
    ("aquamarine", (127, 255, 212)),
    ("azure", (240, 255, 255)),
    ("beige", (245, 245, 220)),
    ("bisque", (255, 228, 196)),
    ("black", (0, 0, 0)),
    ("blanchedalmond", (255, 235, 205)),
    ("blue", (0, 0, 255)),
    ("blueviolet", (138, 43, 226)),
    ("brown", (165, 42, 42)),
    ("burlywood", (222, 184, 135)),
    ("cadetblue", (95, 158, 160)),
    ("chartreuse", (127, 255, 0)),
    ("chocolate", (210, 105, 30)),
    ("coral", (255, 127, 80)),
    ("cornflowerblue", (100, 149, 237)),
    ("cornsilk", (255, 248, 220)),
    ("crimson", (220, 20, 60)),
    ("cyan", (0, 255, 255)),
    ("darkblue", (0, 0, 139)),
    ("darkcyan", (0, 139, 139)),
    ("darkgoldenrod", (184, 134, 11)),
    ("darkgray", (169, 169, 169)),
    ("darkgreen", (0, 100, 0)),
    ("darkgrey", (169, 169, 169)),
    ("darkkhaki", (189, 183, 107)),
    ("darkmagenta", (139, 0, 139)),
    ("darkolivegreen", (85, 107, 47)),
    ("darkorange", (255, 140, 0)),
    ("darkorchid", (153, 50, 204)),
    ("darkred", (139, 0, 0)),
    ("darksalmon", (233, 150, 122)),
    ("darkseagreen", (143, 188, 143)),
    ("darkslateblue", (72, 61, 139)),
    ("darkslategray", (47, 79, 79)),
    ("darkslategrey", (47, 79, 79)),
    ("darkturquoise", (0, 206, 209)),
    ("darkviolet", (148, 0, 211)),
    ("deeppink", (255, 20, 147)),
    ("deepskyblue", (0, 191, 255)),
    ("dimgray", (105, 105, 105)),
    ("dimgrey", (105, 105, 105)),
    ("dodgerblue", (30, 144, 255)),
    ("firebrick", (178, 34, 34)),
    ("floralwhite", (255, 250, 240)),
    ("forestgreen", (34, 139, 34)),
    ("fuchsia", (255, 0, 255)),
    ("gainsboro", (220, 220, 220)),
    ("ghostwhite", (248, 248, 255)),
    ("gold", (255, 215, 0)),
    ("goldenrod", (218, 165, 32)),
    ("gray", (128, 128, 128)),
    ("green", (0, 128, 0)),
    ("greenyellow", (173, 255, 47)),
    ("grey", (128, 128, 128)),
    ("honeydew", (240, 255, 240)),
    ("hotpink", (255, 105, 180)),
    ("indianred", (205, 92, 92)),
    ("indigo", (75, 0, 130)),
    ("ivory", (255, 255, 240)),
    ("khaki", (240, 230, 140)),
    ("lavender", (230, 230, 250)),
    ("lavenderblush", (255, 240, 245)),
    ("lawngreen", (124, 252, 0)),
    ("lemonchiffon", (255, 250, 205)),
    ("lightblue", (173, 216, 230)),
    ("lightcoral", (240, 128, 128)),
    ("lightcyan", (224, 255, 255)),
    ("lightgoldenrodyellow", (250, 250, 210)),
    ("lightgray", (211, 211, 211)),
    ("lightgreen", (144, 238, 144)),
    ("lightgrey", (211, 211, 211)),
    ("lightpink", (255, 182, 193)),
    ("lightsalmon", (255, 160, 122)),
    ("lightseagreen", (32, 178, 170)),
    ("lightskyblue", (135, 206, 250)),
    ("lightslategray", (119, 136, 153)),
    ("lightslategrey", (119, 136, 153)),
    ("lightsteelblue", (176, 196, 222)),
    ("lightyellow", (255, 255, 224)),
    ("lime", (0, 255, 0)),
    ("limegreen", (50, 205, 50)),
    ("linen", (250, 240, 230)),
    ("magenta", (255, 0, 255)),
    ("maroon", (128, 0, 0)),
    ("mediumaquamarine", (102, 205, 170)),
    ("mediumblue", (0, 0, 205)),
    ("mediumorchid", (186, 85, 211)),
    ("mediumpurple", (147, 112, 219)),
    ("mediumseagreen", (60, 179, 113)),
    ("mediumslateblue", (123, 104, 238)),
    ("mediumspringgreen", (0, 250, 154)),
    ("mediumturquoise", (72, 209, 204)),
    ("mediumvioletred", (199, 21, 133)),
    ("midnightblue", (25, 25, 112)),
    ("mintcream", (245, 255, 250)),
    ("mistyrose", (255, 228, 225)),
    ("moccasin", (255, 228, 181)),
    ("navajowhite", (255, 222, 173)),
    ("navy", (0, 0, 128)),
    ("oldlace", (253, 245, 230)),
    ("olive", (128, 128, 0)),
    ("olivedrab", (107, 142, 35)),
    ("orange", (255, 165, 0)),
    ("orangered", (255, 69, 0)),
    ("orchid", (218, 112, 214)),
    ("palegoldenrod", (238, 232, 170)),
    ("palegreen", (152, 251, 152)),
    ("paleturquoise", (175, 238, 238)),
    ("palevioletred", (219, 112, 147)),
    ("papayawhip", (255, 239, 213)),
    ("peachpuff", (255, 218, 185)),
    ("peru", (205, 133, 63)),
    ("pink", (255, 192, 203)),
    ("plum", (221, 160, 221)),
    ("powderblue", (176, 224, 230)),
    ("purple", (128, 0, 128)),
    ("rebeccapurple", (102, 51, 153)),
    ("red", (255, 0, 0)),
    ("rosybrown", (188, 143, 143)),
    ("royalblue", (65, 105, 225)),
    ("saddlebrown", (139, 69, 19)),
    ("salmon", (250, 128, 114)),
    ("sandybrown", (244, 164, 96)),
    ("seagreen", (46, 139, 87)),
    ("seashell", (255, 245, 238)),
    ("sienna", (160, 82, 45)),
    ("silver", (192, 192, 192)),
    ("skyblue", (135, 206, 235)),
    ("slateblue", (106, 90, 205)),
    ("slategray", (112, 128, 144)),
    ("slategrey", (112, 128, 144)),
    ("snow", (255, 250, 250)),
    ("springgreen", (0, 255, 127)),
    ("steelblue", (70, 130, 180)),
    ("tan", (210, 180, 140)),
    ("teal", (0, 128, 128)),
    ("thistle", (216, 191, 216)),
    ("tomato", (255, 99, 71)),
    ("turquoise", (64, 224, 208)),
    ("violet", (238, 130, 238)),
    ("wheat", (245, 222, 179)),
    ("white", (255, 255, 255)),
    ("whitesmoke", (245, 245, 245)),
    ("yellow", (255, 255, 0)),
    ("yellowgreen", (154, 205, 50)),
];
