fn main() {
    // Listeners live in a thread-local slot until `teardown` runs.
    care_page::start();
}
