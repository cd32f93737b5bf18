//! Checkerboard background removal for sheets exported with a fake
//! transparency grid baked in.

use std::collections::VecDeque;

use super::SpriteSheet;

/// Colours closer together than this across channels count as grey.
const MAX_SATURATION: u8 = 30;
/// Grey brighter than this is background.
const LIGHT_THRESHOLD: u32 = 80;
/// Grey darker than this is grid line.
const DARK_THRESHOLD: u32 = 30;

fn is_background(r: u8, g: u8, b: u8) -> bool {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max - min >= MAX_SATURATION {
        return false;
    }
    let brightness = (r as u32 + g as u32 + b as u32) / 3;
    brightness > LIGHT_THRESHOLD || brightness < DARK_THRESHOLD
}

/// Flood-fill from every edge pixel through 4-neighbours, clearing
/// background-coloured pixels. Pixels not reachable from the border keep
/// their colour, so grey details inside the sprite survive.
/// Returns the number of pixels cleared.
pub fn remove_checkerboard(sheet: &mut SpriteSheet) -> usize {
    let w = sheet.width as usize;
    let h = sheet.height as usize;
    if w == 0 || h == 0 {
        return 0;
    }

    let mut visited = vec![false; w * h];
    let mut queue = VecDeque::with_capacity(2 * (w + h));
    for x in 0..w {
        queue.push_back((x, 0));
        queue.push_back((x, h - 1));
    }
    for y in 0..h {
        queue.push_back((0, y));
        queue.push_back((w - 1, y));
    }

    let mut cleared = 0;
    while let Some((x, y)) = queue.pop_front() {
        let idx = y * w + x;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;

        let px = &mut sheet.pixels[idx * 4..idx * 4 + 4];
        if px[3] == 0 || !is_background(px[0], px[1], px[2]) {
            continue;
        }
        px.copy_from_slice(&[0, 0, 0, 0]);
        cleared += 1;

        if x > 0 {
            queue.push_back((x - 1, y));
        }
        if x + 1 < w {
            queue.push_back((x + 1, y));
        }
        if y > 0 {
            queue.push_back((x, y - 1));
        }
        if y + 1 < h {
            queue.push_back((x, y + 1));
        }
    }
    cleared
}
