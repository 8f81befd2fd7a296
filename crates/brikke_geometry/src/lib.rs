use derive_more::Constructor;

/// Size of an image or a sub-image in pixels.
#[derive(Constructor, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl<T> From<(T, T)> for Size<T> {
    fn from((w, h): (T, T)) -> Self {
        Self::new(w, h)
    }
}

/// An axis-aligned rectangle defined by its top-left corner and size.
#[derive(Default, Constructor, Clone, Debug, PartialEq, Eq)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub w: T,
    pub h: T,
}

impl<T: Copy> Rect<T> {
    pub fn size(&self) -> Size<T> {
        Size::new(self.w, self.h)
    }
}

impl<T> From<(T, T, T, T)> for Rect<T> {
    fn from((x, y, w, h): (T, T, T, T)) -> Self {
        Self::new(x, y, w, h)
    }
}

impl<T: Default> From<Size<T>> for Rect<T> {
    fn from(value: Size<T>) -> Self {
        Self::new(T::default(), T::default(), value.w, value.h)
    }
}

impl From<&Rect<u32>> for Rect<f32> {
    fn from(value: &Rect<u32>) -> Self {
        Self::new(
            value.x as f32,
            value.y as f32,
            value.w as f32,
            value.h as f32,
        )
    }
}
