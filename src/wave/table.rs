//! Quarter-sine waveform lookup table for microstepping.

/// Quarter-sine drive magnitudes in Q1.15, 32 entries covering (0°, 90°).
///
/// Entry `i` is `sin((i + 0.5) * 90° / 32)` encoded with round-half-up
/// (`32768*x + 0.5`). The half-entry offset keeps the mirrored read
/// (`SINE_QUARTER[31 - i]`) usable as the cosine of the same angle, so one
/// table serves both active channels of a quadrant.
pub const SINE_QUARTER: [u16; 32] = [
    804,   // 0.024541229
    2411,  // 0.073564564
    4011,  // 0.122410675
    5602,  // 0.170961889
    7180,  // 0.21910124
    8740,  // 0.266712757
    10279, // 0.31368174
    11793, // 0.359895037
    13279, // 0.405241314
    14733, // 0.44961133
    16151, // 0.492898192
    17531, // 0.53499762
    18868, // 0.575808191
    20160, // 0.615231591
    21403, // 0.653172843
    22595, // 0.689540545
    23732, // 0.724247083
    24812, // 0.757208847
    25833, // 0.788346428
    26791, // 0.817584813
    27684, // 0.844853565
    28511, // 0.870086991
    29269, // 0.893224301
    29957, // 0.914209756
    30572, // 0.932992799
    31114, // 0.949528181
    31581, // 0.963776066
    31972, // 0.97570213
    32286, // 0.985277642
    32522, // 0.992479535
    32679, // 0.997290457
    32758, // 0.999698819
];
