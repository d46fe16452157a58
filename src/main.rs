fn main() {
    click_ripple::run();
}
