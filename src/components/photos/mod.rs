mod providers;
mod reducer;

pub use providers::{
    AnyPhotoProvider, LatestPhotosProvider, OwnerPhotosProvider, PhotoProvider,
    SearchPhotosProvider,
};
pub use reducer::{reduce, PhotosAction, State};
