use crate::error::GeoHexError;
use crate::index::constants::{H_KEY, MAX_LEVEL, MAX_PREFIX, PREFIX_RADIX, pow3};
use crate::index::indexing::{GridCoord, fold_grid};

/// One `(x, y)` pair of ternary digits, each in `0..=2`.
type TernaryPair = (u8, u8);

fn ternary_digit(remainder: &mut i64, pow: i64) -> u8 {
    let half = (pow + 1) / 2;
    if *remainder >= half {
        *remainder -= pow;
        2
    } else if *remainder <= -half {
        *remainder += pow;
        0
    } else {
        1
    }
}

/// Splits a grid coordinate into `level + 3` balanced-ternary digit pairs,
/// most significant first.
fn ternary_pairs(grid: GridCoord, level: u8) -> Vec<TernaryPair> {
    let top = level as u32 + 2;
    let mut rem_x = grid.x;
    let mut rem_y = grid.y;

    (0..=top)
        .map(|i| {
            let pow = pow3(top - i);
            (ternary_digit(&mut rem_x, pow), ternary_digit(&mut rem_y, pow))
        })
        .collect()
}

/// On the eastern half, a leading (2,1) or (1,0) followed by two diagonal
/// pairs names the same cell as (1,2) or (0,1); the latter is canonical.
fn correct_seam_collision(pairs: &mut [TernaryPair]) {
    if pairs[1].0 != pairs[1].1 || pairs[2].0 != pairs[2].1 {
        return;
    }
    pairs[0] = match pairs[0] {
        (2, 1) => (1, 2),
        (1, 0) => (0, 1),
        other => other,
    };
}

/// Encodes a canonical grid coordinate as a zone code.
///
/// `center_lon` is the longitude of the cell center, forced to -180 for cells
/// on the antimeridian seam.
///
/// # Code format
///
/// Each of the `level + 3` digit pairs becomes one base-9 digit `3x + y`.
/// The first three base-9 digits, read as a decimal number (0-888), are
/// split into two letters of [`H_KEY`] (`value / 30`, `value % 30`); the
/// remaining `level` digits follow verbatim.
pub(crate) fn encode_zone_code(grid: GridCoord, level: u8, center_lon: f64) -> String {
    let mut pairs = ternary_pairs(grid, level);
    if center_lon == -180.0 || center_lon >= 0.0 {
        correct_seam_collision(&mut pairs);
    }

    let digits: Vec<u8> = pairs.iter().map(|&(x, y)| 3 * x + y).collect();
    let prefix = digits[..3]
        .iter()
        .fold(0u32, |acc, &d| acc * 10 + u32::from(d));

    let mut code = String::with_capacity(level as usize + 2);
    code.push(char::from(H_KEY[(prefix / PREFIX_RADIX) as usize]));
    code.push(char::from(H_KEY[(prefix % PREFIX_RADIX) as usize]));
    code.extend(digits[3..].iter().map(|&d| char::from(b'0' + d)));
    code
}

fn key_index(character: char, position: usize) -> Result<u32, GeoHexError> {
    H_KEY
        .iter()
        .position(|&k| char::from(k) == character)
        .map(|i| i as u32)
        .ok_or(GeoHexError::InvalidCodeCharacter {
            position,
            character,
        })
}

/// Decimal digits of the prefix value, without leading zeros.
fn prefix_digits(prefix: u32) -> Result<Vec<u8>, GeoHexError> {
    if prefix > MAX_PREFIX {
        return Err(GeoHexError::InvalidCodePrefix(prefix));
    }
    let digits: Vec<u8> = prefix
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect();
    if digits.contains(&9) {
        return Err(GeoHexError::InvalidCodePrefix(prefix));
    }
    Ok(digits)
}

/// Undoes the eastern seam correction. Runs on the unpadded digit run, so
/// for prefixes below 100 the probe looks into the code's own digits.
fn remap_seam_digit(digits: &mut [u8]) {
    let free = |d: Option<&u8>| d.is_some_and(|&d| !matches!(d, 1 | 2 | 5));
    if !(free(digits.get(1)) && free(digits.get(2))) {
        return;
    }
    match digits[0] {
        1 => digits[0] = 3,
        5 => digits[0] = 7,
        _ => {}
    }
}

fn balanced(trit: u8) -> i64 {
    i64::from(trit) - 1
}

/// Decodes a zone code back to its grid coordinate and level.
///
/// The level is `code.len() - 2`. The result is folded into the valid
/// diamond, exactly as on the location path.
///
/// # Example
/// ```
/// use geohex_rs::{GridCoord, decode_zone_code};
///
/// let (grid, level) = decode_zone_code("RU6064").unwrap();
/// assert_eq!(grid, GridCoord::new(-60, 366));
/// assert_eq!(level, 4);
/// ```
///
/// # Errors
///
/// - [`GeoHexError::InvalidCodeLength`] - fewer than 2 or more than 17 characters
/// - [`GeoHexError::InvalidCodeCharacter`] - prefix outside `A-Za-z` or a digit outside `0-8`
/// - [`GeoHexError::InvalidCodePrefix`] - prefix letters that no encoder produces
pub fn decode_zone_code(code: &str) -> Result<(GridCoord, u8), GeoHexError> {
    let decoded = decode_digits(code);
    match &decoded {
        Ok((grid, level)) => {
            tracing::trace!(code, level, x = grid.x, y = grid.y, "Decoded zone code")
        }
        Err(e) => tracing::debug!(code, error = %e, "Rejected zone code"),
    }
    decoded
}

fn decode_digits(code: &str) -> Result<(GridCoord, u8), GeoHexError> {
    let chars: Vec<char> = code.chars().collect();
    if chars.len() < 2 || chars.len() > MAX_LEVEL as usize + 2 {
        return Err(GeoHexError::InvalidCodeLength(chars.len()));
    }
    let level = (chars.len() - 2) as u8;

    let prefix = key_index(chars[0], 0)? * PREFIX_RADIX + key_index(chars[1], 1)?;
    let mut digits = prefix_digits(prefix)?;
    for (offset, &character) in chars[2..].iter().enumerate() {
        let digit = character
            .to_digit(9)
            .ok_or(GeoHexError::InvalidCodeCharacter {
                position: offset + 2,
                character,
            })?;
        digits.push(digit as u8);
    }

    remap_seam_digit(&mut digits);

    let top = level as u32 + 2;
    let padding = top as usize + 1 - digits.len();
    let mut x = 0i64;
    let mut y = 0i64;
    for (i, &digit) in std::iter::repeat_n(&0u8, padding)
        .chain(digits.iter())
        .enumerate()
    {
        let pow = pow3(top - i as u32);
        x += balanced(digit / 3) * pow;
        y += balanced(digit % 3) * pow;
    }

    Ok((fold_grid(GridCoord::new(x, y), level), level))
}
