/// Letterboxed sub-rectangle of the container that a contain-fit image
/// actually covers, and that the tile grid must overlay exactly.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FitRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Aspect-preserving contain fit of `natural` (image pixels) into
/// `container` (rendered box). Degenerate inputs give `None` so layout
/// faults never reach the round state.
pub fn fit_contain(natural: (f64, f64), container: (f64, f64)) -> Option<FitRect> {
    let (image_w, image_h) = natural;
    let (container_w, container_h) = container;
    if !(image_w > 0.0 && image_h > 0.0 && container_w > 0.0 && container_h > 0.0) {
        return None;
    }

    let image_ratio = image_w / image_h;
    let container_ratio = container_w / container_h;

    Some(if image_ratio > container_ratio {
        // image limited by width
        let height = container_w / image_ratio;
        FitRect {
            left: 0.0,
            top: (container_h - height) / 2.0,
            width: container_w,
            height,
        }
    } else {
        // image limited by height
        let width = container_h * image_ratio;
        FitRect {
            left: (container_w - width) / 2.0,
            top: 0.0,
            width,
            height: container_h,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_is_limited_by_width() {
        // 2:1 image into a 400x400 box: full width, centered vertically
        let fit = fit_contain((200.0, 100.0), (400.0, 400.0)).unwrap();

        assert_eq!(
            fit,
            FitRect {
                left: 0.0,
                top: 100.0,
                width: 400.0,
                height: 200.0,
            }
        );
    }

    #[test]
    fn tall_image_is_limited_by_height() {
        // 1:2 image into a 400x400 box: full height, centered horizontally
        let fit = fit_contain((100.0, 200.0), (400.0, 400.0)).unwrap();

        assert_eq!(
            fit,
            FitRect {
                left: 100.0,
                top: 0.0,
                width: 200.0,
                height: 400.0,
            }
        );
    }

    #[test]
    fn matching_ratios_fill_the_container() {
        let fit = fit_contain((800.0, 600.0), (400.0, 300.0)).unwrap();

        assert_eq!(fit.left, 0.0);
        assert_eq!(fit.top, 0.0);
        assert_eq!(fit.width, 400.0);
        assert_eq!(fit.height, 300.0);
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert_eq!(fit_contain((0.0, 100.0), (400.0, 300.0)), None);
        assert_eq!(fit_contain((100.0, 100.0), (0.0, 300.0)), None);
        assert_eq!(fit_contain((100.0, -1.0), (400.0, 300.0)), None);
        assert_eq!(fit_contain((f64::NAN, 100.0), (400.0, 300.0)), None);
    }
}
