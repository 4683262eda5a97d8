/// Compute frame indices for signal framing.
///
/// # Arguments
/// * `len` - Length of the input signal
/// * `frame_length` - Length of each frame
/// * `hop_length` - Number of samples to advance between frames
/// * `center` - If true, account for symmetric padding that centers frames
///
/// # Returns
/// Vector of starting indices for each frame
///
/// # Example
/// ```
/// use skylark::frame::frame_indices;
///
/// let indices = frame_indices(1000, 512, 256, true).unwrap();
/// assert_eq!(indices[0], 0);
/// assert_eq!(indices[1], 256);
/// ```
pub fn frame_indices(
    len: usize,
    frame_length: usize,
    hop_length: usize,
    center: bool,
) -> crate::Result<Vec<usize>> {
    if frame_length == 0 {
        return Err(crate::Error::InvalidSize {
            name: "frame_length",
            value: 0,
            reason: "must be > 0",
        });
    }
    if hop_length == 0 {
        return Err(crate::Error::InvalidSize {
            name: "hop_length",
            value: 0,
            reason: "must be > 0",
        });
    }
    // Must match the buffer sizing in frame_signal: the pad is
    // frame_length / 2 on each side, which is one sample less than
    // frame_length in total when frame_length is odd.
    let padded_len = if center {
        len + 2 * (frame_length / 2)
    } else {
        len
    };
    if padded_len < frame_length {
        return Ok(Vec::new());
    }
    let n_frames = (padded_len - frame_length) / hop_length + 1;
    Ok((0..n_frames).map(|i| i * hop_length).collect())
}

/// Frame a signal into overlapping windows.
///
/// # Arguments
/// * `y` - Input audio signal
/// * `frame_length` - Length of each frame
/// * `hop_length` - Number of samples to advance between frames
/// * `center` - If true, pad the signal symmetrically to center frames
///
/// # Returns
/// Vector of frames, where each frame is a `Vec<f32>`
///
/// # Example
/// ```
/// use skylark::frame::frame_signal;
///
/// let signal = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let frames = frame_signal(&signal, 4, 2, false).unwrap();
/// assert_eq!(frames.len(), 2);
/// assert_eq!(frames[0].len(), 4);
/// ```
pub fn frame_signal(
    y: &[f32],
    frame_length: usize,
    hop_length: usize,
    center: bool,
) -> crate::Result<Vec<Vec<f32>>> {
    let pad = if center { frame_length / 2 } else { 0 };
    let indices = frame_indices(y.len(), frame_length, hop_length, center)?;

    let mut padded = vec![0.0f32; y.len() + 2 * pad];
    padded[pad..pad + y.len()].copy_from_slice(y);

    let mut frames = Vec::with_capacity(indices.len());
    for start in indices {
        frames.push(padded[start..start + frame_length].to_vec());
    }
    Ok(frames)
}

/// Split a signal into consecutive hop-length segments, dropping the final
/// segment.
///
/// The final segment is dropped whether or not it is a full hop: the pitch
/// tracker feeds hop-sized blocks into a rolling analysis buffer and the
/// trailing block never has a complete analysis window behind it.
///
/// # Example
/// ```
/// use skylark::frame::hop_frames;
///
/// let signal: Vec<f32> = (0..10).map(|i| i as f32).collect();
/// let frames = hop_frames(&signal, 4);
/// // Segments: [0..4), [4..8), [8..10); the trailing one is dropped.
/// assert_eq!(frames.len(), 2);
/// ```
pub fn hop_frames(y: &[f32], hop: usize) -> Vec<&[f32]> {
    if hop == 0 || y.len() <= hop {
        return Vec::new();
    }
    let mut frames: Vec<&[f32]> = y.chunks(hop).collect();
    frames.pop();
    frames
}
