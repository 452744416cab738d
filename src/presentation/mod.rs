// Presentation layer - Navigation and headless rendering surfaces
pub mod headless;
pub mod nav;
