//! Join channel rotation over the eight groups of 125 kHz channels.
use super::*;

/// Number of 125 kHz groups, each holding 8 channels.
pub(crate) const NUM_GROUPS: u8 = 8;

/// Channels of `group` still available in `remaining`, one bit per channel.
fn group_bits(remaining: &ChannelMask, group: u8) -> u8 {
    let word = remaining[usize::from(group / 2)];
    if group % 2 == 0 {
        (word & 0x00FF) as u8
    } else {
        (word >> 8) as u8
    }
}

/// Pick the 125 kHz channel of the next join request.
///
/// Groups are visited round robin starting at `group_index`, the first group with an available
/// channel wins and one of its channels is drawn at random. On success `group_index` points past
/// the group that was used, so that consecutive join requests spread over all 64 channels.
pub(crate) fn next_join_channel<RNG: RngCore>(
    rng: &mut RNG,
    remaining: &ChannelMask,
    group_index: &mut u8,
) -> Option<u8> {
    let start = *group_index % NUM_GROUPS;
    for step in 0..NUM_GROUPS {
        let group = (start + step) % NUM_GROUPS;
        let bits = group_bits(remaining, group);
        if bits == 0 {
            continue;
        }
        let pick = random_below(rng, bits.count_ones() as usize);
        let bit = (0..8u8).filter(|&bit| bits & (1 << bit) != 0).nth(pick)?;
        *group_index = (group + 1) % NUM_GROUPS;
        return Some(group * 8 + bit);
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Prng;

    #[test]
    fn groups_rotate() {
        let remaining = ChannelMask::new([0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0x00FF, 0]);
        let mut rng = Prng::new(11);
        let mut index = 0;
        for group in 0..16u8 {
            let channel = next_join_channel(&mut rng, &remaining, &mut index).unwrap();
            assert_eq!(channel / 8, group % 8);
        }
        assert_eq!(index, 0);
    }

    #[test]
    fn empty_groups_are_skipped() {
        // only group 2 (channels 16..24) and group 5 (channels 40..48) have channels left
        let remaining = ChannelMask::new([0, 0x0010, 0x8000, 0, 0, 0]);
        let mut rng = Prng::new(5);
        let mut index = 3;
        assert_eq!(next_join_channel(&mut rng, &remaining, &mut index), Some(47));
        assert_eq!(index, 6);
        assert_eq!(next_join_channel(&mut rng, &remaining, &mut index), Some(20));
        assert_eq!(index, 3);
    }

    #[test]
    fn exhausted_mask() {
        let remaining = ChannelMask::new([0, 0, 0, 0, 0x00FF, 0]);
        let mut rng = Prng::new(5);
        let mut index = 4;
        assert_eq!(next_join_channel(&mut rng, &remaining, &mut index), None);
        assert_eq!(index, 4);
    }
}
